use crate::builder;
use crate::components::{AtomRoot, Electron, Nucleus};
use crate::config::ViewerConfig;
use crate::orbit::{advance_progress, pulse_scale};
use crate::random::AtomRng;
use crate::resources::*;
use crate::spawning::{apply_opacity, release_atom, spawn_atom};
use crate::stage::{AtomStage, StageEffect};
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCameraSystemSet;

/// Element requested by the user (selector, keyboard, startup).
#[derive(Event, Debug, Clone)]
pub struct SelectElementEvent(pub String);

/// Transition work: requests, builds, fades, releases.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitionSet;

/// Per-frame particle motion.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MotionSet;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SelectElementEvent>()
            .init_resource::<SpawnedAtoms>()
            .configure_sets(
                Update,
                (TransitionSet, MotionSet)
                    .chain()
                    .before(PanOrbitCameraSystemSet),
            )
            .add_systems(
                Update,
                (handle_element_requests, drive_stage)
                    .chain()
                    .in_set(TransitionSet),
            )
            .add_systems(Update, (advance_electrons, spin_nuclei).in_set(MotionSet));
    }
}

fn handle_element_requests(
    time: Res<Time>,
    mut events: EventReader<SelectElementEvent>,
    mut stage: ResMut<AtomStage>,
    mut selection: ResMut<ElementSelection>,
) {
    for event in events.read() {
        match stage.request(&event.0, time.elapsed_secs()) {
            Ok(()) => selection.0 = event.0.clone(),
            // The current atom stays as it is.
            Err(e) => warn!("Ignoring selection: {}", e),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn drive_stage(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<ViewerConfig>,
    shared: Res<SharedAssetHandles>,
    mut stage: ResMut<AtomStage>,
    mut rng: ResMut<AtomRng>,
    mut spawned: ResMut<SpawnedAtoms>,
    mut info_panel: ResMut<InfoPanel>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut roots: Query<&mut Transform, With<AtomRoot>>,
) {
    for effect in stage.advance(time.elapsed_secs()) {
        match effect {
            StageEffect::Build {
                atom,
                element,
                appearance,
            } => {
                let blueprint = builder::build(element, &mut **rng, &config.layout);
                *info_panel = InfoPanel::from(element);
                let atom_entities = spawn_atom(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    &shared,
                    &config,
                    atom,
                    &blueprint,
                    appearance,
                );
                info!(
                    "Spawned {} with {} nucleons and {} electrons",
                    element.name,
                    blueprint.nucleons.len(),
                    blueprint.electron_count()
                );
                spawned.insert(atom, atom_entities);
            }
            StageEffect::Appearance {
                atom,
                appearance,
                kind,
            } => {
                let Some(entry) = spawned.get(&atom) else {
                    warn!("No spawned atom for {:?}; skipping fade", atom);
                    continue;
                };
                apply_opacity(
                    &entry.assets,
                    &mut materials,
                    appearance.opacity,
                    config.render.orbit_line_factor(kind),
                );
                match roots.get_mut(entry.root) {
                    Ok(mut transform) => transform.scale = Vec3::splat(appearance.scale),
                    Err(e) => warn!("Atom root {:?} unavailable: {}", entry.root, e),
                }
            }
            StageEffect::Release { atom } => match spawned.remove(&atom) {
                Some(entry) => {
                    release_atom(&mut commands, &mut meshes, &mut materials, entry);
                    debug!("{} atom(s) still on stage", stage.live_atoms());
                }
                None => error!("Release requested for unknown atom {:?}", atom),
            },
        }
    }
}

fn advance_electrons(time: Res<Time>, mut electrons: Query<(&mut Electron, &mut Transform)>) {
    let delta = time.delta_secs();
    // Cosmetic; wraps every hour.
    let elapsed = time.elapsed_secs_wrapped();
    for (mut electron, mut transform) in &mut electrons {
        electron.progress = advance_progress(electron.progress, delta, electron.speed);
        transform.translation = electron.orbit.point_at(electron.progress);
        transform.scale = Vec3::splat(pulse_scale(elapsed, electron.progress));
    }
}

fn spin_nuclei(config: Res<ViewerConfig>, mut nuclei: Query<&mut Transform, With<Nucleus>>) {
    for mut transform in &mut nuclei {
        transform.rotate_y(config.render.nucleus_spin);
    }
}
