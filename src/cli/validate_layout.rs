// src/cli/validate_layout.rs
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::layout::bus_metadata::{validate_bounds, SavedSeat};
use crate::layout::deck_cell::Deck;
use crate::layout::deck_grid::DeckGrid;
use crate::layout::error::LayoutError;
use crate::layout::sleeper::{self, SeatShape};

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatLine {
    pub deck: Deck,
    pub label: String,
    pub shape: SeatShape,
    pub cells: usize,
}

#[derive(Debug, Default)]
pub struct LayoutReport {
    pub seats: Vec<SeatLine>,
    pub problems: Vec<String>,
}

impl LayoutReport {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Hydrates both decks and classifies every seat group. A deck that cannot be
/// hydrated is reported as a problem; only bad bounds are an error.
pub fn check_seats(seats: &[SavedSeat], rows: usize, columns: usize) -> Result<LayoutReport, LayoutError> {
    validate_bounds(rows, columns)?;
    let mut report = LayoutReport::default();

    for deck in Deck::ALL {
        let grid = match DeckGrid::hydrate(rows, columns, seats.iter().filter(|s| s.deck == deck)) {
            Ok(grid) => grid,
            Err(e) => {
                report.problems.push(format!("{} deck: {}", deck, e));
                continue;
            }
        };
        let mut labels: Vec<&str> = grid.labels().collect();
        labels.sort_unstable();
        for label in labels {
            let Some(coords) = grid.cells_with_label(label) else {
                continue;
            };
            let shape = sleeper::classify(coords);
            if let SeatShape::Invalid(violation) = shape {
                report
                    .problems
                    .push(format!("{} deck: {}", deck, violation.into_error(label)));
            }
            report.seats.push(SeatLine {
                deck,
                label: label.to_string(),
                shape,
                cells: coords.len(),
            });
        }
    }
    Ok(report)
}

/// Prints the report. Returns whether the layout is valid.
pub fn run(path: &Path, rows: usize, columns: usize) -> Result<bool, ValidateError> {
    println!("Checking: {} ({}x{})\n", path.display(), rows, columns);

    let raw = fs::read_to_string(path)?;
    let seats: Vec<SavedSeat> = serde_json::from_str(&raw)?;
    let report = check_seats(&seats, rows, columns)?;

    println!("{:<6} {:<10} {:<6} {}", "Deck", "Seat", "Cells", "Shape");
    println!("{}", "-".repeat(48));
    for line in &report.seats {
        println!(
            "{:<6} {:<10} {:<6} {:?}",
            line.deck.to_string(),
            line.label,
            line.cells,
            line.shape
        );
    }

    if report.is_valid() {
        println!("\nLayout OK: {} seats.", report.seats.len());
    } else {
        println!("\n{} problem(s):", report.problems.len());
        for problem in &report.problems {
            println!("  - {}", problem);
        }
    }
    Ok(report.is_valid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::deck_cell::SeatCategory;

    fn seat(label: &str, deck: Deck, row: usize, column: usize, row_span: usize, column_span: usize) -> SavedSeat {
        SavedSeat {
            label: label.to_string(),
            row,
            column,
            row_span,
            column_span,
            category: SeatCategory::Sleeper,
            active: true,
            deck,
        }
    }

    #[test]
    fn test_valid_layout_report() {
        let seats = vec![
            seat("1", Deck::Lower, 0, 0, 1, 2),
            seat("2", Deck::Lower, 1, 0, 2, 1),
            seat("U1", Deck::Upper, 0, 0, 1, 4),
        ];
        let report = check_seats(&seats, 15, 4).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.seats.len(), 3);
        assert_eq!(report.seats[2].deck, Deck::Upper);
        assert_eq!(report.seats[2].cells, 4);
    }

    #[test]
    fn test_oversized_sleeper_reported() {
        let seats = vec![seat("T", Deck::Upper, 0, 3, 3, 1)];
        let report = check_seats(&seats, 15, 4).unwrap();
        assert!(!report.is_valid());
        assert_eq!(report.problems.len(), 1);
        assert!(report.problems[0].starts_with("upper deck:"));
    }

    #[test]
    fn test_category_mismatch_reported() {
        let mut single = seat("5", Deck::Lower, 3, 1, 1, 1);
        single.category = SeatCategory::Sleeper;
        let mut wide = seat("6", Deck::Upper, 0, 0, 1, 2);
        wide.category = SeatCategory::Seater;
        let report = check_seats(&[single, wide], 15, 4).unwrap();
        assert!(!report.is_valid());
        assert_eq!(report.problems.len(), 2);
        assert!(report.problems[0].starts_with("lower deck:"));
        assert!(report.problems[1].starts_with("upper deck:"));
    }

    #[test]
    fn test_bad_bounds_rejected() {
        assert!(matches!(check_seats(&[], 15, 6), Err(LayoutError::InvalidBounds { .. })));
    }
}
