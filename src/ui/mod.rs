// src/ui/mod.rs

mod help_panel;
mod info_panel;

use bevy::prelude::*;

use help_panel::HelpPanelPlugin;
use info_panel::InfoPanelPlugin;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((InfoPanelPlugin, HelpPanelPlugin));
    }
}
