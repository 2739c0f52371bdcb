use crate::catalog;
use crate::config::ViewerConfig;
use crate::resources::ElementSelection;
use crate::simulation::{SelectElementEvent, TransitionSet};
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use bevy_egui::input::egui_wants_any_keyboard_input;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraSystemSet};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct InteractionSet;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, InteractionSet.before(TransitionSet))
            .add_systems(
                Update,
                (
                    cycle_element_with_arrows.run_if(not(egui_wants_any_keyboard_input)),
                    auto_rotate_camera,
                )
                    .in_set(InteractionSet),
            )
            .add_systems(
                PreUpdate,
                control_camera_activity.before(PanOrbitCameraSystemSet),
            );
    }
}

fn control_camera_activity(mut camera_q: Query<&mut PanOrbitCamera>, mut contexts: EguiContexts) {
    let Ok(mut camera) = camera_q.single_mut() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else { return };

    // Dragging over the selector must not orbit the camera.
    let should_be_enabled = !(ctx.wants_pointer_input() || ctx.wants_keyboard_input());
    if camera.enabled != should_be_enabled {
        debug!("Camera enabled: {}", should_be_enabled);
        camera.enabled = should_be_enabled;
    }
}

fn cycle_element_with_arrows(
    keys: Res<ButtonInput<KeyCode>>,
    selection: Res<ElementSelection>,
    mut writer: EventWriter<SelectElementEvent>,
) {
    let step = if keys.just_pressed(KeyCode::ArrowRight) {
        1
    } else if keys.just_pressed(KeyCode::ArrowLeft) {
        -1
    } else {
        return;
    };
    let next = catalog::cycle(&selection.0, step);
    writer.write(SelectElementEvent(next.name.to_string()));
}

fn auto_rotate_camera(
    time: Res<Time>,
    config: Res<ViewerConfig>,
    mut camera_q: Query<&mut PanOrbitCamera>,
) {
    for mut camera in &mut camera_q {
        if !camera.enabled {
            continue;
        }
        camera.target_yaw += config.render.auto_rotate_speed * time.delta_secs();
        camera.force_update = true;
    }
}
