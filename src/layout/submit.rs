// src/layout/submit.rs
use serde::{Deserialize, Serialize};

use super::deck_cell::SeatCategory;
use super::deck_grid::DeckGrid;
use super::error::LayoutError;
use super::sleeper::{self, SeatShape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedCell {
    pub label: String,
    pub category: SeatCategory,
}

/// Full two-deck snapshot sent on save. The collaborator derives anchors and
/// spans from the grids and overwrites the bus layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSubmission {
    pub bus_id: String,
    pub lower_deck: Vec<Vec<SubmittedCell>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_deck: Option<Vec<Vec<SubmittedCell>>>,
}

impl LayoutSubmission {
    /// Builds the payload. The upper deck is only included when it holds a seat.
    pub fn from_decks(
        bus_id: &str,
        lower: &DeckGrid,
        upper: &DeckGrid,
    ) -> Result<Self, LayoutError> {
        validate_snapshot(lower)?;
        let upper_deck = if upper.is_empty() {
            None
        } else {
            validate_snapshot(upper)?;
            Some(serialize_deck(upper))
        };
        Ok(Self {
            bus_id: bus_id.to_string(),
            lower_deck: serialize_deck(lower),
            upper_deck,
        })
    }

    pub fn seat_count(&self) -> usize {
        let count = |deck: &Vec<Vec<SubmittedCell>>| {
            deck.iter()
                .flatten()
                .filter(|cell| cell.category != SeatCategory::Empty)
                .map(|cell| cell.label.as_str())
                .collect::<std::collections::HashSet<_>>()
                .len()
        };
        count(&self.lower_deck) + self.upper_deck.as_ref().map_or(0, count)
    }
}

fn serialize_deck(grid: &DeckGrid) -> Vec<Vec<SubmittedCell>> {
    grid.cells()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| SubmittedCell {
                    label: cell.label.clone(),
                    category: cell.category,
                })
                .collect()
        })
        .collect()
}

/// Re-checks every seat group in `grid` before it leaves the editor.
pub fn validate_snapshot(grid: &DeckGrid) -> Result<(), LayoutError> {
    for label in grid.labels() {
        let Some(coords) = grid.cells_with_label(label) else {
            continue;
        };
        if let SeatShape::Invalid(violation) = sleeper::classify(coords) {
            return Err(violation.into_error(label));
        }
    }
    Ok(())
}
