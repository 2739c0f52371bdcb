// src/ui/help_panel.rs

use bevy::prelude::*;
use bevy_egui::input::egui_wants_any_keyboard_input;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

/// A resource to control the visibility of the help window.
#[derive(Resource, Default)]
struct HelpPanelState {
    is_open: bool,
}

pub struct HelpPanelPlugin;

impl Plugin for HelpPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HelpPanelState>()
            .add_systems(
                Update,
                toggle_help_visibility.run_if(not(egui_wants_any_keyboard_input)),
            )
            .add_systems(EguiPrimaryContextPass, help_panel_egui_system);
    }
}

fn toggle_help_visibility(keys: Res<ButtonInput<KeyCode>>, mut help_state: ResMut<HelpPanelState>) {
    if keys.just_pressed(KeyCode::KeyH) {
        help_state.is_open = !help_state.is_open;
    }
}

fn help_panel_egui_system(mut contexts: EguiContexts, mut panel_state: ResMut<HelpPanelState>) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    if panel_state.is_open {
        egui::Window::new("Help")
            .open(&mut panel_state.is_open)
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-10.0, -10.0))
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("help_grid")
                    .num_columns(2)
                    .spacing([20.0, 4.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for (key, action) in [
                            ("h", "Toggle this help window"),
                            ("Left / Right", "Previous / next element"),
                            ("LMB Drag", "Rotate Camera"),
                            ("RMB Drag", "Pan Camera"),
                            ("Scroll", "Zoom Camera"),
                        ] {
                            ui.label(key);
                            ui.label(action);
                            ui.end_row();
                        }
                    });
            });
    } else {
        egui::Area::new(egui::Id::new("Help Opener Area"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    let response = ui.button("❔ Help (H)");
                    if response.clicked() {
                        panel_state.is_open = true;
                    }
                    response.on_hover_text("Click or press 'H' to open the help panel.");
                });
            });
    }
}
