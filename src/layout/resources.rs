// src/layout/resources.rs

use bevy::prelude::*;

use super::bus_metadata::{BusMetadata, SavedSeat};
use super::deck_cell::Deck;
use super::deck_grid::{DeckGrid, DeckSummary};
use super::error::LayoutError;
use super::submit::LayoutSubmission;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Queued,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Queued,
    Saving,
    Saved(String),
    Failed(String),
}

impl SaveStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SaveStatus::Queued | SaveStatus::Saving)
    }
}

/// The one editor session: the bus being edited and its two decks.
#[derive(Resource, Debug, Default)]
pub struct SeatLayoutEditor {
    /// Bus id requested by the operator; set as soon as a load is queued.
    pub bus_id: Option<String>,
    pub bus: Option<BusMetadata>,
    pub lower: DeckGrid,
    pub upper: DeckGrid,
    pub load_status: LoadStatus,
    pub save_status: SaveStatus,
    /// Edits made since the last load or successful save.
    pub dirty: bool,
    /// Bumped on every accepted edit.
    pub revision: u64,
    /// Snapshot taken when Save was pressed, waiting to be sent.
    pub pending_submission: Option<LayoutSubmission>,
    /// Revision of the snapshot currently being saved.
    pub in_flight_revision: Option<u64>,
}

impl SeatLayoutEditor {
    pub fn deck(&self, deck: Deck) -> &DeckGrid {
        match deck {
            Deck::Lower => &self.lower,
            Deck::Upper => &self.upper,
        }
    }

    pub fn deck_mut(&mut self, deck: Deck) -> &mut DeckGrid {
        match deck {
            Deck::Lower => &mut self.lower,
            Deck::Upper => &mut self.upper,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.bus.is_some() && self.load_status == LoadStatus::Loaded
    }

    /// Replaces both decks with the saved layout of `bus`.
    pub fn install_bus(&mut self, bus: BusMetadata, seats: &[SavedSeat]) -> Result<(), LayoutError> {
        let (rows, columns) = bus.deck_bounds()?;
        let lower = DeckGrid::hydrate(rows, columns, seats.iter().filter(|s| s.deck == Deck::Lower))?;
        let upper = DeckGrid::hydrate(rows, columns, seats.iter().filter(|s| s.deck == Deck::Upper))?;
        self.bus_id = Some(bus.id.clone());
        self.bus = Some(bus);
        self.lower = lower;
        self.upper = upper;
        self.dirty = false;
        self.revision = 0;
        Ok(())
    }

    pub fn mark_edited(&mut self) {
        self.revision += 1;
        self.dirty = true;
    }

    /// Takes the save snapshot of both decks for the loaded bus.
    pub fn snapshot(&self) -> Result<LayoutSubmission, LayoutError> {
        let bus_id = self.bus.as_ref().map(|b| b.id.as_str()).unwrap_or_default();
        LayoutSubmission::from_decks(bus_id, &self.lower, &self.upper)
    }

    pub fn summary(&self) -> (DeckSummary, DeckSummary) {
        (self.lower.summary(), self.upper.summary())
    }
}
