mod animation;
mod builder;
mod catalog;
mod components;
mod config;
mod error;
mod interaction;
mod orbit;
mod random;
mod resources;
mod setup;
mod simulation;
mod spawning;
mod spawning_utils;
mod stage;
mod ui;
#[cfg(target_arch = "wasm32")]
use bevy::audio::AudioPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use clap::Parser;
use config::ViewerConfig;
use interaction::InteractionPlugin;
use random::AtomRng;
use resources::*;
use setup::SetupPlugin;
use simulation::SimulationPlugin;
use stage::AtomStage;
use ui::UIPlugin;

#[derive(Resource, Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// The element shown at startup.
    #[arg(short, long, default_value = catalog::DEFAULT_ELEMENT)]
    element: String,

    /// Seed for nucleus and shell layout; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding layout, timing and render settings.
    #[arg(long)]
    config: Option<String>,

    /// Render without HDR bloom.
    #[arg(long, default_value_t = false)]
    no_bloom: bool,
}

fn main() {
    let args = CliArgs::parse();
    let config = ViewerConfig::load_or_default(args.config.as_deref());

    let mut app = App::new();

    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Atom Viewer".into(),
            canvas: Some("#bevy".to_string()),
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    });

    #[cfg(target_arch = "wasm32")]
    let default_plugins = default_plugins.build().disable::<AudioPlugin>();

    app.add_plugins(default_plugins)
        .insert_resource(AtomStage::new(config.timing.clone()))
        .insert_resource(AtomRng::new(args.seed))
        .init_resource::<ElementSelection>()
        .insert_resource(config)
        .insert_resource(args)
        .add_plugins((
            PanOrbitCameraPlugin,
            EguiPlugin::default(),
            SetupPlugin,
            SimulationPlugin,
            InteractionPlugin,
            UIPlugin,
        ))
        .run();
}
