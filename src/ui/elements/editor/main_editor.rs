// src/ui/elements/editor/main_editor.rs
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::layout::client::BusApiClient;
use crate::layout::events::{
    ClearCellRequest, ClearDeckRequest, RequestLoadBus, RequestSaveLayout, SetCellLabelRequest,
};
use crate::layout::{Deck, SeatLayoutEditor};
use crate::settings::SettingsStore;
use crate::ui::elements::popups::{show_clear_deck_popup, show_settings_popup};
use crate::ui::elements::top_panel::show_top_panel;
use crate::ui::UiFeedbackState;

use super::deck_table::{deck_table, CellAction};
use super::state::EditorWindowState;

/// Every request the editor window can raise.
#[derive(SystemParam)]
pub struct LayoutEventWriters<'w> {
    pub load: EventWriter<'w, RequestLoadBus>,
    pub save: EventWriter<'w, RequestSaveLayout>,
    pub set_label: EventWriter<'w, SetCellLabelRequest>,
    pub clear_cell: EventWriter<'w, ClearCellRequest>,
    pub clear_deck: EventWriter<'w, ClearDeckRequest>,
}

impl LayoutEventWriters<'_> {
    fn dispatch(&mut self, action: CellAction) {
        match action {
            CellAction::Set { deck, coord, label } => {
                self.set_label.write(SetCellLabelRequest { deck, coord, label });
            }
            CellAction::Clear { deck, coord } => {
                self.clear_cell.write(ClearCellRequest { deck, coord });
            }
        }
    }
}

pub fn seat_layout_editor_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<EditorWindowState>,
    editor: Res<SeatLayoutEditor>,
    ui_feedback: Res<UiFeedbackState>,
    mut client: ResMut<BusApiClient>,
    mut settings: ResMut<SettingsStore>,
    mut writers: LayoutEventWriters,
) {
    let ctx = contexts.ctx_mut();

    show_settings_popup(ctx, &mut state, &mut settings, &mut client);
    show_clear_deck_popup(ctx, &mut state, &mut writers.clear_deck);

    egui::TopBottomPanel::top("seat_layout_top_panel").show(ctx, |ui| {
        ui.add_space(4.0);
        show_top_panel(ui, &mut state, &editor, &mut writers);
        ui.add_space(4.0);
    });

    egui::TopBottomPanel::bottom("seat_layout_feedback_panel").show(ctx, |ui| {
        if ui_feedback.last_message.is_empty() {
            ui.weak("Click a cell to enter a seat number. Repeat a number in adjacent cells to make a sleeper. Right-click clears.");
        } else {
            let text_color = if ui_feedback.is_error {
                egui::Color32::RED
            } else {
                ui.style().visuals.text_color()
            };
            ui.colored_label(text_color, &ui_feedback.last_message);
        }
    });

    let mut actions: Vec<CellAction> = Vec::new();
    egui::CentralPanel::default().show(ctx, |ui| {
        if !editor.is_ready() {
            ui.centered_and_justified(|ui| {
                ui.label("Load a bus to edit its seat layout.");
            });
            return;
        }

        egui::ScrollArea::both().show(ui, |ui| {
            ui.horizontal_top(|ui| {
                for deck in Deck::ALL {
                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            ui.heading(deck.title());
                            let grid = editor.deck(deck);
                            if ui
                                .add_enabled(!grid.is_empty(), egui::Button::new("Clear deck"))
                                .clicked()
                            {
                                state.clear_deck_target = Some(deck);
                            }
                        });
                        deck_table(ui, deck, editor.deck(deck), &mut state, &mut actions);
                    });
                    ui.add_space(24.0);
                }
            });
        });
    });

    for action in actions {
        writers.dispatch(action);
    }
}
