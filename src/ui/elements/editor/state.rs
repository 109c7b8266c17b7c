// src/ui/elements/editor/state.rs
use bevy::prelude::*;

use crate::layout::{CellCoord, Deck};

/// Inline edit of one cell: the text typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub deck: Deck,
    pub coord: CellCoord,
    pub buffer: String,
    /// Focus is requested once, on the first frame of the edit.
    pub focus_requested: bool,
}

#[derive(Resource, Debug, Default)]
pub struct EditorWindowState {
    pub bus_id_input: String,
    pub editing: Option<CellEdit>,

    pub clear_deck_target: Option<Deck>,

    pub show_settings_popup: bool,
    pub settings_api_base_input: String,
    pub settings_default_bus_input: String,
    pub settings_save_status: String,
    pub settings_new_token_input: String,
    pub settings_token_status: String,
}

impl EditorWindowState {
    pub fn with_bus_id(bus_id: Option<String>) -> Self {
        Self {
            bus_id_input: bus_id.unwrap_or_default(),
            ..default()
        }
    }

    /// Starts editing `coord`, seeded with its current label. Returns the
    /// edit it replaced when that one was open on another cell; its buffer has
    /// not been committed yet.
    pub fn begin_edit(
        &mut self,
        deck: Deck,
        coord: CellCoord,
        current_label: &str,
    ) -> Option<CellEdit> {
        if self.is_editing(deck, coord) {
            return None;
        }
        self.editing.replace(CellEdit {
            deck,
            coord,
            buffer: current_label.to_string(),
            focus_requested: false,
        })
    }

    pub fn is_editing(&self, deck: Deck, coord: CellCoord) -> bool {
        self.editing
            .as_ref()
            .is_some_and(|e| e.deck == deck && e.coord == coord)
    }
}
