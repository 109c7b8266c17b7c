// src/layout/handler.rs

use bevy::prelude::*;

use super::deck_cell::Deck;
use super::events::*;
use super::mutator::{self, EditOutcome};
use super::resources::{LoadStatus, SaveStatus, SeatLayoutEditor};

/// Handles `RequestLoadBus`: queues a load, discarding any unsaved edits once it lands.
pub(crate) fn handle_load_request_system(
    mut events: EventReader<RequestLoadBus>,
    mut editor: ResMut<SeatLayoutEditor>,
    mut feedback_writer: EventWriter<LayoutOperationFeedback>,
) {
    // Only the latest request of the frame matters.
    let Some(event) = events.read().last() else {
        return;
    };
    let bus_id = event.bus_id.trim().to_string();
    if bus_id.is_empty() {
        feedback_writer.write(LayoutOperationFeedback::error("Enter a bus id to load."));
        return;
    }
    if editor.save_status.is_in_flight() {
        warn!("SeatLayout: load of bus '{}' refused while a save is in progress", bus_id);
        feedback_writer.write(LayoutOperationFeedback::error(
            "Wait for the current save to finish before loading another bus.",
        ));
        return;
    }
    if editor.dirty {
        info!("SeatLayout: discarding unsaved edits on '{:?}'", editor.bus_id);
    }
    editor.bus_id = Some(bus_id.clone());
    editor.load_status = LoadStatus::Queued;
    info!("SeatLayout: load of bus '{}' queued.", bus_id);
}

/// Handles `BusLoadedEvent`: hydrates both decks or reports the failure.
pub(crate) fn handle_bus_loaded_system(
    mut events: EventReader<BusLoadedEvent>,
    mut editor: ResMut<SeatLayoutEditor>,
    mut feedback_writer: EventWriter<LayoutOperationFeedback>,
) {
    for event in events.read() {
        if editor.load_status != LoadStatus::Loading
            || editor.bus_id.as_deref() != Some(event.bus_id.as_str())
        {
            info!(
                "SeatLayout: Ignoring stale load result for bus '{}' (current: {:?}, {:?})",
                event.bus_id, editor.bus_id, editor.load_status
            );
            continue;
        }
        match &event.result {
            Ok((bus, seats)) => match editor.install_bus(bus.clone(), seats) {
                Ok(()) => {
                    editor.load_status = LoadStatus::Loaded;
                    editor.save_status = SaveStatus::Idle;
                    let (lower, upper) = editor.summary();
                    let msg = format!(
                        "Loaded bus '{}' ({}x{}): {} lower-deck and {} upper-deck seats.",
                        event.bus_id,
                        bus.rows,
                        bus.columns,
                        lower.seats(),
                        upper.seats()
                    );
                    info!("SeatLayout: {}", msg);
                    feedback_writer.write(LayoutOperationFeedback::info(msg));
                }
                Err(e) => {
                    let msg = format!("Saved layout of bus '{}' cannot be shown: {}", event.bus_id, e);
                    error!("SeatLayout: {}", msg);
                    editor.load_status = LoadStatus::Failed(e.to_string());
                    feedback_writer.write(LayoutOperationFeedback::error(msg));
                }
            },
            Err(e) => {
                let msg = format!("Failed to load bus '{}': {}", event.bus_id, e);
                error!("SeatLayout: {}", msg);
                editor.load_status = LoadStatus::Failed(e.to_string());
                feedback_writer.write(LayoutOperationFeedback::error(msg));
            }
        }
    }
}

fn apply_edit(
    editor: &mut SeatLayoutEditor,
    deck: Deck,
    description: &str,
    result: Result<EditOutcome, super::error::LayoutError>,
    feedback_writer: &mut EventWriter<LayoutOperationFeedback>,
) {
    match result {
        Ok(EditOutcome::Unchanged) => {
            trace!("SeatLayout: {} on {} deck changed nothing", description, deck);
        }
        Ok(outcome) => {
            editor.mark_edited();
            debug!("SeatLayout: {} on {} deck -> {:?}", description, deck, outcome);
        }
        Err(e) => {
            let msg = format!("{} deck: {}", deck.title(), e);
            warn!("SeatLayout: {} rejected: {}", description, e);
            feedback_writer.write(LayoutOperationFeedback::error(msg));
        }
    }
}

fn refuse_if_not_ready(
    editor: &SeatLayoutEditor,
    feedback_writer: &mut EventWriter<LayoutOperationFeedback>,
) -> bool {
    if editor.is_ready() {
        return false;
    }
    warn!("SeatLayout: edit ignored, no bus loaded");
    feedback_writer.write(LayoutOperationFeedback::error("Load a bus before editing its layout."));
    true
}

/// Handles `SetCellLabelRequest` through the mutator.
pub(crate) fn handle_set_cell_label_system(
    mut events: EventReader<SetCellLabelRequest>,
    mut editor: ResMut<SeatLayoutEditor>,
    mut feedback_writer: EventWriter<LayoutOperationFeedback>,
) {
    for event in events.read() {
        if refuse_if_not_ready(&editor, &mut feedback_writer) {
            continue;
        }
        let result = mutator::set_label(editor.deck_mut(event.deck), event.coord, &event.label);
        let description = format!("seat '{}' at {}", event.label.trim(), event.coord);
        apply_edit(&mut editor, event.deck, &description, result, &mut feedback_writer);
    }
}

/// Handles `ClearCellRequest`.
pub(crate) fn handle_clear_cell_system(
    mut events: EventReader<ClearCellRequest>,
    mut editor: ResMut<SeatLayoutEditor>,
    mut feedback_writer: EventWriter<LayoutOperationFeedback>,
) {
    for event in events.read() {
        if refuse_if_not_ready(&editor, &mut feedback_writer) {
            continue;
        }
        let result = mutator::clear_cell(editor.deck_mut(event.deck), event.coord);
        let description = format!("clear {}", event.coord);
        apply_edit(&mut editor, event.deck, &description, result, &mut feedback_writer);
    }
}

/// Handles `ClearDeckRequest`.
pub(crate) fn handle_clear_deck_system(
    mut events: EventReader<ClearDeckRequest>,
    mut editor: ResMut<SeatLayoutEditor>,
    mut feedback_writer: EventWriter<LayoutOperationFeedback>,
) {
    for ClearDeckRequest(deck) in events.read() {
        if refuse_if_not_ready(&editor, &mut feedback_writer) {
            continue;
        }
        let result = mutator::clear_deck(editor.deck_mut(*deck));
        apply_edit(&mut editor, *deck, "clear deck", result, &mut feedback_writer);
    }
}

/// Handles `RequestSaveLayout`: snapshots both decks and queues the save.
/// Only one save may be queued or running at a time.
pub(crate) fn handle_save_request_system(
    mut events: EventReader<RequestSaveLayout>,
    mut editor: ResMut<SeatLayoutEditor>,
    mut feedback_writer: EventWriter<LayoutOperationFeedback>,
) {
    if events.read().count() == 0 {
        return;
    }
    if editor.save_status.is_in_flight() {
        info!("SeatLayout: save already queued or in progress.");
        feedback_writer.write(LayoutOperationFeedback::error("A save is already in progress."));
        return;
    }
    if !editor.is_ready() {
        warn!("SeatLayout: cannot save, no bus loaded.");
        feedback_writer.write(LayoutOperationFeedback::error("Load a bus before saving."));
        return;
    }
    match editor.snapshot() {
        Ok(submission) => {
            info!(
                "SeatLayout: save queued for bus '{}' ({} seats, upper deck {}).",
                submission.bus_id,
                submission.seat_count(),
                if submission.upper_deck.is_some() { "included" } else { "omitted" }
            );
            editor.in_flight_revision = Some(editor.revision);
            editor.pending_submission = Some(submission);
            editor.save_status = SaveStatus::Queued;
        }
        Err(e) => {
            let msg = format!("Layout cannot be saved: {}", e);
            warn!("SeatLayout: {}", msg);
            editor.save_status = SaveStatus::Failed(e.to_string());
            feedback_writer.write(LayoutOperationFeedback::error(msg));
        }
    }
}

/// Handles `LayoutSaveResultEvent`. The grids are never touched here: on failure
/// the operator can correct and save again.
pub(crate) fn handle_save_result_system(
    mut events: EventReader<LayoutSaveResultEvent>,
    mut editor: ResMut<SeatLayoutEditor>,
    mut feedback_writer: EventWriter<LayoutOperationFeedback>,
) {
    for event in events.read() {
        if editor.save_status != SaveStatus::Saving {
            info!(
                "SeatLayout: Ignoring stale save result for bus '{}' (current status: {:?})",
                event.bus_id, editor.save_status
            );
            continue;
        }
        let saved_revision = editor.in_flight_revision.take();
        match &event.result {
            Ok(msg) => {
                editor.dirty = saved_revision != Some(editor.revision);
                editor.save_status = SaveStatus::Saved(msg.clone());
                info!("SeatLayout: {}", msg);
                feedback_writer.write(LayoutOperationFeedback::info(msg.clone()));
            }
            Err(e) => {
                let error_string = e.to_string();
                error!("SeatLayout: Error saving bus '{}': {}", event.bus_id, error_string);
                editor.save_status = SaveStatus::Failed(error_string.clone());
                feedback_writer.write(LayoutOperationFeedback::error(error_string));
            }
        }
    }
}
