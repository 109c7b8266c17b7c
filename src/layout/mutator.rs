// src/layout/mutator.rs
//! Single entry point for operator edits on a deck grid.
//!
//! Every edit is all-or-nothing: shape checks run before the first write, so a
//! rejected edit leaves the grid untouched.

use bevy::log::debug;
use std::collections::BTreeSet;

use super::deck_cell::{Cell, CellCoord, SeatCategory};
use super::deck_grid::DeckGrid;
use super::error::LayoutError;
use super::sleeper::{self, SeatShape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Unchanged,
    Seater(CellCoord),
    Sleeper { shape: SeatShape, cells: usize },
    Cleared { cells: usize },
}

/// Trims a proposed seat number and checks it is alphanumeric. Empty is allowed.
pub fn normalize_label(raw: &str) -> Result<String, LayoutError> {
    let label = raw.trim();
    if label.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(label.to_string())
    } else {
        Err(LayoutError::InvalidLabel(label.to_string()))
    }
}

/// Gives the cell at `at` the seat number `raw_label`. An empty label clears it.
pub fn set_label(
    grid: &mut DeckGrid,
    at: CellCoord,
    raw_label: &str,
) -> Result<EditOutcome, LayoutError> {
    let label = normalize_label(raw_label)?;
    if label.is_empty() {
        return clear_cell(grid, at);
    }

    let mut group: BTreeSet<CellCoord> = grid.cells_with_label(&label).cloned().unwrap_or_default();
    let already_member = !group.insert(at);

    let shape = sleeper::classify(&group);
    if let SeatShape::Invalid(violation) = shape {
        debug!(
            "Mutator: rejected '{}' at {} ({} cells): {:?}",
            label,
            at,
            group.len(),
            violation
        );
        return Err(violation.into_error(&label));
    }
    grid.check_bounds(at)?;

    if already_member {
        return Ok(EditOutcome::Unchanged);
    }

    let previous_label = grid.get(at)?.label.clone();
    if !previous_label.is_empty() {
        let cleared = clear_group(grid, &previous_label)?;
        debug!(
            "Mutator: cleared previous seat '{}' ({} cells) before assigning '{}'",
            previous_label, cleared, label
        );
    }

    let Some(anchor) = group.first().copied() else {
        return Ok(EditOutcome::Unchanged);
    };
    if group.len() == 1 {
        grid.set(at, Cell::seater(label))?;
        return Ok(EditOutcome::Seater(at));
    }
    for coord in &group {
        grid.set(*coord, Cell::sleeper(label.as_str(), *coord != anchor))?;
    }
    Ok(EditOutcome::Sleeper {
        shape,
        cells: group.len(),
    })
}

/// Empties the cell at `at`. A sleeper is removed as a whole.
pub fn clear_cell(grid: &mut DeckGrid, at: CellCoord) -> Result<EditOutcome, LayoutError> {
    let cell = grid.get(at)?.clone();
    match cell.category {
        SeatCategory::Empty => Ok(EditOutcome::Unchanged),
        SeatCategory::Seater => {
            grid.set(at, Cell::empty())?;
            Ok(EditOutcome::Cleared { cells: 1 })
        }
        SeatCategory::Sleeper => {
            let cells = clear_group(grid, &cell.label)?;
            Ok(EditOutcome::Cleared { cells })
        }
    }
}

/// Empties every cell of the deck.
pub fn clear_deck(grid: &mut DeckGrid) -> Result<EditOutcome, LayoutError> {
    let labels: Vec<String> = grid.labels().map(str::to_string).collect();
    let mut cells = 0;
    for label in labels {
        cells += clear_group(grid, &label)?;
    }
    if cells == 0 {
        Ok(EditOutcome::Unchanged)
    } else {
        Ok(EditOutcome::Cleared { cells })
    }
}

fn clear_group(grid: &mut DeckGrid, label: &str) -> Result<usize, LayoutError> {
    let coords: Vec<CellCoord> = grid
        .cells_with_label(label)
        .map(|set| set.iter().copied().collect())
        .unwrap_or_default();
    for coord in &coords {
        grid.set(*coord, Cell::empty())?;
    }
    Ok(coords.len())
}
