// src/layout/processes.rs

use bevy::prelude::*;
use bevy_tokio_tasks::TokioTasksRuntime;
use chrono::Local;

use super::client::BusApiClient;
use super::events::{BusLoadedEvent, LayoutSaveResultEvent};
use super::resources::{LoadStatus, SaveStatus, SeatLayoutEditor};

/// Moves queued load/save requests in flight on the tokio runtime. Results come
/// back as `BusLoadedEvent` / `LayoutSaveResultEvent`.
pub(crate) fn process_layout_requests_system(
    mut editor: ResMut<SeatLayoutEditor>,
    runtime: Res<TokioTasksRuntime>,
    api: Res<BusApiClient>,
) {
    // --- Load ---
    if editor.load_status == LoadStatus::Queued {
        match editor.bus_id.clone() {
            Some(bus_id) => {
                editor.load_status = LoadStatus::Loading;
                info!("SeatLayout: Spawning async load for bus '{}'...", bus_id);
                let client = api.clone();
                runtime.spawn_background_task(move |mut ctx| async move {
                    let result = client.load_bus(&bus_id).await;
                    ctx.run_on_main_thread(move |ctx| {
                        ctx.world.send_event(BusLoadedEvent { bus_id, result });
                    })
                    .await;
                });
            }
            None => {
                editor.load_status = LoadStatus::Failed("No bus id was given.".to_string());
                warn!("SeatLayout: load queued without a bus id.");
            }
        }
    }

    // --- Save ---
    if editor.save_status == SaveStatus::Queued {
        match editor.pending_submission.take() {
            Some(submission) => {
                editor.save_status = SaveStatus::Saving;
                info!("SeatLayout: Spawning async save for bus '{}'...", submission.bus_id);
                let client = api.clone();
                runtime.spawn_background_task(move |mut ctx| async move {
                    let bus_id = submission.bus_id.clone();
                    let result = client.save_layout(&submission).await.map(|confirmation| {
                        format!(
                            "{} (bus '{}', {})",
                            confirmation.unwrap_or_else(|| "Seat layout saved".to_string()),
                            bus_id,
                            Local::now().format("%H:%M:%S")
                        )
                    });
                    ctx.run_on_main_thread(move |ctx| {
                        ctx.world.send_event(LayoutSaveResultEvent { bus_id, result });
                    })
                    .await;
                });
            }
            None => {
                editor.save_status = SaveStatus::Failed("Nothing to save.".to_string());
                editor.in_flight_revision = None;
                warn!("SeatLayout: save queued without a snapshot.");
            }
        }
    }
}
