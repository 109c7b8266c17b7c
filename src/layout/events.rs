// src/layout/events.rs

use bevy::prelude::*;

use super::bus_metadata::{BusMetadata, SavedSeat};
use super::deck_cell::{CellCoord, Deck};
use super::error::ApiError;

/// Event to fetch a bus and its saved layout, replacing both decks.
#[derive(Event, Debug, Clone)]
pub struct RequestLoadBus {
    pub bus_id: String,
}

/// Result of a bus load, sent back from the background task.
#[derive(Event, Debug, Clone)]
pub struct BusLoadedEvent {
    pub bus_id: String,
    pub result: Result<(BusMetadata, Vec<SavedSeat>), ApiError>,
}

/// Operator typed a seat number into a cell. An empty label clears the cell.
#[derive(Event, Debug, Clone)]
pub struct SetCellLabelRequest {
    pub deck: Deck,
    pub coord: CellCoord,
    pub label: String,
}

#[derive(Event, Debug, Clone)]
pub struct ClearCellRequest {
    pub deck: Deck,
    pub coord: CellCoord,
}

#[derive(Event, Debug, Clone)]
pub struct ClearDeckRequest(pub Deck);

/// Event sent when the operator presses Save.
#[derive(Event, Debug, Clone)]
pub struct RequestSaveLayout;

/// Result of a save. `Ok` carries the confirmation shown to the operator.
#[derive(Event, Debug, Clone)]
pub struct LayoutSaveResultEvent {
    pub bus_id: String,
    pub result: Result<String, ApiError>,
}

#[derive(Event, Debug, Clone)]
pub struct LayoutOperationFeedback {
    pub message: String,
    pub is_error: bool,
}

impl LayoutOperationFeedback {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}
