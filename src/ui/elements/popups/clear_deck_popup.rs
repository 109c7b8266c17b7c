// src/ui/elements/popups/clear_deck_popup.rs
use bevy::prelude::*;
use bevy_egui::egui;

use crate::layout::events::ClearDeckRequest;
use crate::ui::elements::editor::EditorWindowState;

pub fn show_clear_deck_popup(
    ctx: &egui::Context,
    state: &mut EditorWindowState,
    clear_deck_writer: &mut EventWriter<ClearDeckRequest>,
) {
    let Some(deck) = state.clear_deck_target else {
        return;
    };

    let mut is_open = true;
    let mut clear_clicked = false;
    let mut cancel_clicked = false;

    egui::Window::new("Confirm Clear")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut is_open)
        .show(ctx, |ui| {
            ui.label(format!("Remove every seat from the {}?", deck.title().to_lowercase()));
            ui.colored_label(
                egui::Color32::YELLOW,
                "Nothing is sent to the server until you press Save.",
            );
            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add(egui::Button::new("CLEAR").fill(egui::Color32::DARK_RED))
                    .clicked()
                {
                    clear_clicked = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel_clicked = true;
                }
            });
        });

    if clear_clicked {
        clear_deck_writer.write(ClearDeckRequest(deck));
    }
    if clear_clicked || cancel_clicked || !is_open {
        state.clear_deck_target = None;
    }
}
