// src/layout/plugin.rs
use bevy::prelude::*;

use super::client::BusApiClient;
use super::events::*;
use super::handler::{
    handle_bus_loaded_system, handle_clear_cell_system, handle_clear_deck_system,
    handle_load_request_system, handle_save_request_system, handle_save_result_system,
    handle_set_cell_label_system,
};
use super::processes::process_layout_requests_system;
use super::resources::SeatLayoutEditor;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
enum SeatLayoutSystemSet {
    ApplyResults, // Results coming back from background tasks
    UserInput,    // Operator edits and requests
    Dispatch,     // Spawning queued network work
}

/// Plugin owning the seat-layout editor session and its REST traffic.
pub struct SeatLayoutPlugin {
    pub api_base_url: String,
    pub api_token: Option<String>,
    /// Bus to load as soon as the app starts.
    pub initial_bus_id: Option<String>,
}

#[derive(Resource, Debug, Clone)]
struct InitialBus(String);

impl Plugin for SeatLayoutPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SeatLayoutSystemSet::ApplyResults,
                SeatLayoutSystemSet::UserInput.after(SeatLayoutSystemSet::ApplyResults),
                SeatLayoutSystemSet::Dispatch.after(SeatLayoutSystemSet::UserInput),
            ),
        );

        app.init_resource::<SeatLayoutEditor>()
            .insert_resource(BusApiClient::new(&self.api_base_url, self.api_token.clone()));

        app.add_event::<RequestLoadBus>()
            .add_event::<BusLoadedEvent>()
            .add_event::<SetCellLabelRequest>()
            .add_event::<ClearCellRequest>()
            .add_event::<ClearDeckRequest>()
            .add_event::<RequestSaveLayout>()
            .add_event::<LayoutSaveResultEvent>()
            .add_event::<LayoutOperationFeedback>();

        if let Some(bus_id) = self.initial_bus_id.clone().filter(|id| !id.trim().is_empty()) {
            app.insert_resource(InitialBus(bus_id));
            app.add_systems(Startup, request_initial_bus_load);
        }

        app.add_systems(
            Update,
            (handle_bus_loaded_system, handle_save_result_system)
                .chain()
                .in_set(SeatLayoutSystemSet::ApplyResults),
        );
        app.add_systems(
            Update,
            (
                handle_load_request_system,
                handle_set_cell_label_system,
                handle_clear_cell_system,
                handle_clear_deck_system,
                handle_save_request_system,
            )
                .chain()
                .in_set(SeatLayoutSystemSet::UserInput),
        );
        app.add_systems(
            Update,
            process_layout_requests_system.in_set(SeatLayoutSystemSet::Dispatch),
        );

        info!(
            "SeatLayoutPlugin initialized (API: {}, token: {}).",
            self.api_base_url,
            if self.api_token.is_some() { "set" } else { "none" }
        );
    }
}

fn request_initial_bus_load(initial: Res<InitialBus>, mut writer: EventWriter<RequestLoadBus>) {
    info!("SeatLayout: loading bus '{}' given at startup.", initial.0);
    writer.write(RequestLoadBus {
        bus_id: initial.0.clone(),
    });
}
