// src/ui/info_panel.rs

use crate::catalog::ELEMENTS;
use crate::resources::{ElementSelection, InfoPanel};
use crate::simulation::SelectElementEvent;
use crate::stage::{AtomStage, TransitionState};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

pub struct InfoPanelPlugin;

impl Plugin for InfoPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InfoPanel>()
            .add_systems(EguiPrimaryContextPass, info_panel_egui_system);
    }
}

/// Element selector plus the fields of the atom that was built last.
fn info_panel_egui_system(
    mut contexts: EguiContexts,
    selection: Res<ElementSelection>,
    info: Res<InfoPanel>,
    stage: Res<AtomStage>,
    mut writer: EventWriter<SelectElementEvent>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    egui::Area::new(egui::Id::new("atom_info_area"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .show(ctx, |ui| {
            let frame = egui::Frame::popup(ui.style()).fill(egui::Color32::from_black_alpha(160));
            frame.show(ui, |ui| {
                ui.set_width(200.0);

                let mut chosen = selection.0.as_str();
                egui::ComboBox::from_label("Element")
                    .selected_text(chosen)
                    .show_ui(ui, |ui| {
                        for spec in &ELEMENTS {
                            ui.selectable_value(&mut chosen, spec.name, spec.name);
                        }
                    });
                if chosen != selection.0 {
                    writer.write(SelectElementEvent(chosen.to_string()));
                }

                ui.separator();
                if stage.state() != TransitionState::Idle {
                    ui.label(egui::RichText::new("Transitioning...").weak());
                }
                ui.label(egui::RichText::new(&info.name).font(egui::FontId::proportional(20.0)));
                egui::Grid::new("atom_info_grid")
                    .num_columns(2)
                    .spacing([20.0, 2.0])
                    .show(ui, |ui| {
                        for (label, value) in [
                            ("Atomic number", info.atomic_number),
                            ("Protons", info.protons),
                            ("Neutrons", info.neutrons),
                            ("Electrons", info.electrons),
                        ] {
                            ui.label(label);
                            ui.label(value.to_string());
                            ui.end_row();
                        }
                    });
            });
        });
}
