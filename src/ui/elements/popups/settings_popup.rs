// src/ui/elements/popups/settings_popup.rs
use bevy::log::{error, info};
use bevy_egui::egui;

use crate::layout::client::BusApiClient;
use crate::settings::{credentials, SettingsStore};
use crate::ui::elements::editor::EditorWindowState;

fn token_status(client: &BusApiClient) -> &'static str {
    if client.has_token() {
        "Token set"
    } else {
        "No token (requests are sent unauthenticated)"
    }
}

/// Copies the stored settings into the popup's input fields.
fn sync_inputs(state: &mut EditorWindowState, store: &SettingsStore, client: &BusApiClient) {
    state.settings_api_base_input = store.settings.api_base_url.clone();
    state.settings_default_bus_input = store.settings.default_bus_id.clone().unwrap_or_default();
    state.settings_token_status = token_status(client).to_string();
}

pub fn show_settings_popup(
    ctx: &egui::Context,
    state: &mut EditorWindowState,
    store: &mut SettingsStore,
    client: &mut BusApiClient,
) {
    if !state.show_settings_popup {
        return;
    }
    if state.settings_token_status.is_empty() {
        sync_inputs(state, store, client);
    }

    let mut is_window_open = true;
    let mut close_requested = false;

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut is_window_open)
        .show(ctx, |ui| {
            ui.heading("Bus API");
            ui.separator();

            egui::Grid::new("settings_grid").num_columns(2).show(ui, |ui| {
                ui.label("Base URL:");
                ui.add(
                    egui::TextEdit::singleline(&mut state.settings_api_base_input)
                        .desired_width(280.0),
                );
                ui.end_row();

                ui.label("Default bus:");
                ui.add(
                    egui::TextEdit::singleline(&mut state.settings_default_bus_input)
                        .desired_width(280.0),
                );
                ui.end_row();
            });

            if ui.button("Save Settings").clicked() {
                let base = state.settings_api_base_input.trim();
                if base.is_empty() {
                    state.settings_save_status = "Base URL cannot be empty.".to_string();
                } else {
                    store.settings.api_base_url = base.to_string();
                    let bus = state.settings_default_bus_input.trim();
                    store.settings.default_bus_id = (!bus.is_empty()).then(|| bus.to_string());
                    client.set_base_url(base);
                    match store.save() {
                        Ok(()) => {
                            info!("Settings: saved (API: {}).", client.base_url());
                            state.settings_save_status = "Settings saved.".to_string();
                        }
                        Err(e) => {
                            error!("Settings: failed to save: {}", e);
                            state.settings_save_status = format!("Could not save settings: {}", e);
                        }
                    }
                }
            }

            if !state.settings_save_status.is_empty() {
                ui.label(state.settings_save_status.as_str());
            }

            ui.add_space(8.0);
            ui.heading("API Token");
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Status:");
                ui.label(state.settings_token_status.as_str());
            });

            ui.label("New token (stored in the system keyring):");
            ui.add(
                egui::TextEdit::singleline(&mut state.settings_new_token_input)
                    .password(true)
                    .desired_width(f32::INFINITY),
            );

            ui.horizontal(|ui| {
                if ui.button("Store Token").clicked() {
                    let token = state.settings_new_token_input.trim().to_string();
                    if token.is_empty() {
                        info!("Settings: token input was empty, nothing stored.");
                    } else {
                        match credentials::store_api_token(&token) {
                            Ok(()) => state.settings_token_status = "Token stored".to_string(),
                            Err(e) => {
                                error!("Settings: could not store token: {}", e);
                                state.settings_token_status =
                                    format!("Keyring unavailable, token kept for this session: {}", e);
                            }
                        }
                        client.set_token(Some(token));
                        state.settings_new_token_input.clear();
                    }
                }

                if ui.button("Clear Token").clicked() {
                    if let Err(e) = credentials::clear_api_token() {
                        error!("Settings: could not clear token: {}", e);
                    }
                    client.set_token(None);
                    state.settings_token_status = token_status(client).to_string();
                }
            });

            ui.separator();
            if ui.button("Close").clicked() {
                close_requested = true;
            }
        });

    if !is_window_open || close_requested {
        state.show_settings_popup = false;
        state.settings_new_token_input.clear();
        state.settings_token_status.clear();
        state.settings_save_status.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppSettings;

    #[test]
    fn test_sync_inputs_from_store() {
        let mut state = EditorWindowState::default();
        let store = SettingsStore {
            settings: AppSettings {
                api_base_url: "https://fleet.example.com/api".to_string(),
                default_bus_id: Some("B3".to_string()),
            },
            path: None,
        };
        let client = BusApiClient::new(&store.settings.api_base_url, Some("t".to_string()));
        sync_inputs(&mut state, &store, &client);
        assert_eq!(state.settings_api_base_input, "https://fleet.example.com/api");
        assert_eq!(state.settings_default_bus_input, "B3");
        assert_eq!(state.settings_token_status, "Token set");
    }
}
