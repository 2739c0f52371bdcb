use super::resources::*;
use crate::CliArgs;
use crate::catalog::{self, DEFAULT_ELEMENT};
use crate::config::ViewerConfig;
use crate::spawning_utils::{ELECTRON_RADIUS, NUCLEON_RADIUS};
use crate::stage::AtomStage;
use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

pub struct SetupPlugin;

impl Plugin for SetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (setup_scene, setup_shared_assets, show_initial_element).chain(),
        );
    }
}

fn setup_scene(mut commands: Commands, args: Res<CliArgs>, config: Res<ViewerConfig>) {
    info!("Setting up scene: Camera, Lights");
    let [r, g, b] = config.render.background;
    commands.insert_resource(ClearColor(Color::srgb_u8(r, g, b)));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 80.0,
        ..default()
    });

    let mut camera = commands.spawn((
        PanOrbitCamera {
            zoom_lower_limit: 3.0,
            zoom_upper_limit: Some(60.0),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 25.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    if args.no_bloom {
        info!("Bloom disabled");
    } else {
        camera.insert((
            Camera {
                hdr: true,
                ..default()
            },
            Tonemapping::TonyMcMapface,
            Bloom {
                intensity: config.render.bloom_intensity,
                ..Bloom::NATURAL
            },
        ));
    }

    commands.spawn((
        DirectionalLight {
            color: Color::srgb_u8(0x90, 0xca, 0xff),
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            color: Color::srgb_u8(0xff, 0x80, 0xc0),
            illuminance: 4_000.0,
            ..default()
        },
        Transform::from_xyz(-10.0, -5.0, -10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn setup_shared_assets(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let nucleon_mesh = meshes.add(Sphere::new(NUCLEON_RADIUS).mesh().uv(32, 32));
    let electron_mesh = meshes.add(Sphere::new(ELECTRON_RADIUS).mesh().uv(16, 16));
    commands.insert_resource(SharedAssetHandles {
        nucleon_mesh,
        electron_mesh,
    });
}

fn show_initial_element(
    time: Res<Time>,
    args: Res<CliArgs>,
    mut stage: ResMut<AtomStage>,
    mut selection: ResMut<ElementSelection>,
) {
    let name = match catalog::lookup(&args.element) {
        Ok(spec) => spec.name,
        Err(e) => {
            warn!("{}; starting with {}", e, DEFAULT_ELEMENT);
            DEFAULT_ELEMENT
        }
    };
    match stage.show(name, time.elapsed_secs()) {
        Ok(()) => selection.0 = name.to_string(),
        Err(e) => error!("Could not show initial element: {}", e),
    }
}
