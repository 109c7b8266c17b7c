// src/ui/elements/top_panel.rs
use bevy_egui::egui;

use crate::layout::events::{RequestLoadBus, RequestSaveLayout};
use crate::layout::resources::{LoadStatus, SaveStatus};
use crate::layout::SeatLayoutEditor;
use crate::ui::elements::editor::main_editor::LayoutEventWriters;
use crate::ui::elements::editor::state::EditorWindowState;

fn load_status_text(status: &LoadStatus) -> (String, Option<egui::Color32>) {
    match status {
        LoadStatus::Idle => ("No bus loaded".to_string(), None),
        LoadStatus::Queued | LoadStatus::Loading => ("Loading...".to_string(), None),
        LoadStatus::Loaded => ("Loaded".to_string(), Some(egui::Color32::LIGHT_GREEN)),
        LoadStatus::Failed(e) => (format!("Load failed: {}", e), Some(egui::Color32::RED)),
    }
}

fn save_status_text(status: &SaveStatus) -> Option<(String, egui::Color32)> {
    match status {
        SaveStatus::Idle => None,
        SaveStatus::Queued | SaveStatus::Saving => {
            Some(("Saving...".to_string(), egui::Color32::YELLOW))
        }
        SaveStatus::Saved(at) => Some((format!("Saved: {}", at), egui::Color32::LIGHT_GREEN)),
        SaveStatus::Failed(e) => Some((format!("Save failed: {}", e), egui::Color32::RED)),
    }
}

/// Bus selection, Save and status line.
pub fn show_top_panel(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    editor: &SeatLayoutEditor,
    writers: &mut LayoutEventWriters,
) {
    let save_in_flight = editor.save_status.is_in_flight();
    let loading = matches!(editor.load_status, LoadStatus::Queued | LoadStatus::Loading);

    ui.horizontal(|ui| {
        ui.label("Bus:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.bus_id_input)
                .hint_text("bus id")
                .desired_width(140.0),
        );
        let enter_pressed =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let can_load = !state.bus_id_input.trim().is_empty() && !save_in_flight && !loading;
        let load_clicked = ui
            .add_enabled(can_load, egui::Button::new("Load"))
            .on_disabled_hover_text("Enter a bus id; loading waits for a running save.")
            .clicked();
        if can_load && (load_clicked || enter_pressed) {
            writers.load.write(RequestLoadBus {
                bus_id: state.bus_id_input.trim().to_string(),
            });
        }

        ui.separator();

        let save_label = if save_in_flight { "Saving..." } else { "Save" };
        if ui
            .add_enabled(
                editor.is_ready() && !save_in_flight,
                egui::Button::new(save_label),
            )
            .on_hover_text("Send both decks to the server")
            .clicked()
        {
            writers.save.write(RequestSaveLayout);
        }

        ui.separator();

        if ui.button("⚙ Settings").clicked() {
            state.show_settings_popup = true;
        }
    });

    ui.horizontal(|ui| {
        let (load_text, load_color) = load_status_text(&editor.load_status);
        match (&editor.bus, load_color) {
            (Some(bus), Some(color)) if editor.load_status == LoadStatus::Loaded => {
                let title = if bus.name.is_empty() {
                    format!("Bus '{}'", bus.id)
                } else {
                    format!("Bus '{}' {}", bus.id, bus.name)
                };
                ui.colored_label(color, format!("{} ({} x {})", title, bus.rows, bus.columns));
            }
            (_, Some(color)) => {
                ui.colored_label(color, load_text);
            }
            (_, None) => {
                ui.label(load_text);
            }
        }

        if editor.is_ready() {
            let (lower, upper) = editor.summary();
            ui.separator();
            ui.label(format!(
                "Lower: {} seats ({} sleeper)  Upper: {} seats ({} sleeper)",
                lower.seats(),
                lower.sleepers,
                upper.seats(),
                upper.sleepers
            ));
            if editor.dirty {
                ui.colored_label(egui::Color32::YELLOW, "● unsaved changes");
            }
        }

        if let Some((text, color)) = save_status_text(&editor.save_status) {
            ui.separator();
            ui.colored_label(color, text);
        }
    });
}
