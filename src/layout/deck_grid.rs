// src/layout/deck_grid.rs
use bevy::log::{debug, trace};
use std::collections::{BTreeSet, HashMap};

use super::bus_metadata::SavedSeat;
use super::deck_cell::{Cell, CellCoord, SeatCategory};
use super::error::LayoutError;
use super::sleeper::{MAX_HORIZONTAL_SPAN, MAX_VERTICAL_SPAN};

/// Seat counts for one deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeckSummary {
    pub seaters: usize,
    pub sleepers: usize,
    pub occupied_cells: usize,
}

impl DeckSummary {
    pub fn seats(&self) -> usize {
        self.seaters + self.sleepers
    }
}

/// Rectangular cell matrix for one deck, with a label -> coordinates index
/// kept in step with every write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Cell>>,
    label_index: HashMap<String, BTreeSet<CellCoord>>,
}

impl DeckGrid {
    pub fn create_empty(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![Cell::empty(); columns]; rows],
            label_index: HashMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row < self.rows && coord.col < self.columns
    }

    pub fn check_bounds(&self, coord: CellCoord) -> Result<(), LayoutError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(LayoutError::OutOfBounds {
                coord,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    pub fn get(&self, coord: CellCoord) -> Result<&Cell, LayoutError> {
        self.check_bounds(coord)?;
        Ok(&self.cells[coord.row][coord.col])
    }

    /// Replaces one cell and returns what was there. Only bounds are checked;
    /// seat shape rules live in the mutator.
    pub fn set(&mut self, coord: CellCoord, cell: Cell) -> Result<Cell, LayoutError> {
        self.check_bounds(coord)?;
        let previous = std::mem::replace(&mut self.cells[coord.row][coord.col], cell);

        if !previous.label.is_empty() {
            if let Some(coords) = self.label_index.get_mut(&previous.label) {
                coords.remove(&coord);
                if coords.is_empty() {
                    self.label_index.remove(&previous.label);
                }
            }
        }
        let label = &self.cells[coord.row][coord.col].label;
        if !label.is_empty() {
            self.label_index
                .entry(label.clone())
                .or_default()
                .insert(coord);
        }
        trace!("DeckGrid: cell {} '{}' -> '{}'", coord, previous.label, label);
        Ok(previous)
    }

    pub fn cells_with_label(&self, label: &str) -> Option<&BTreeSet<CellCoord>> {
        self.label_index.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.label_index.keys().map(String::as_str)
    }

    /// True when no cell carries a seat.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Cell::is_empty)
    }

    /// Row-major view of all cells.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn summary(&self) -> DeckSummary {
        let mut summary = DeckSummary::default();
        for coords in self.label_index.values() {
            let Some(first) = coords.iter().next() else {
                continue;
            };
            match self.cells[first.row][first.col].category {
                SeatCategory::Seater => summary.seaters += 1,
                SeatCategory::Sleeper => summary.sleepers += 1,
                SeatCategory::Empty => continue,
            }
            summary.occupied_cells += coords.len();
        }
        summary
    }

    /// Paints previously saved seats onto a fresh grid. Inactive records are
    /// skipped; anything that would overlap or leave the grid is rejected.
    pub fn hydrate<'a>(
        rows: usize,
        columns: usize,
        seats: impl IntoIterator<Item = &'a SavedSeat>,
    ) -> Result<Self, LayoutError> {
        let mut grid = Self::create_empty(rows, columns);
        let mut painted = 0usize;

        for seat in seats {
            if !seat.active {
                trace!("DeckGrid: skipping inactive saved seat '{}'", seat.label);
                continue;
            }
            let label = seat.label.trim();
            if label.is_empty() {
                return Err(LayoutError::InvalidSavedSeat {
                    label: seat.label.clone(),
                    reason: "empty seat number".to_string(),
                });
            }
            if seat.row_span == 0 || seat.column_span == 0 {
                return Err(LayoutError::InvalidSavedSeat {
                    label: label.to_string(),
                    reason: format!("span {}x{}", seat.row_span, seat.column_span),
                });
            }
            check_saved_shape(label, seat)?;
            if grid.label_index.contains_key(label) {
                return Err(LayoutError::InvalidSavedSeat {
                    label: label.to_string(),
                    reason: "seat number used by another seat".to_string(),
                });
            }

            let anchor = CellCoord::new(seat.row, seat.column);
            let (Some(row_end), Some(col_end)) = (
                seat.row.checked_add(seat.row_span),
                seat.column.checked_add(seat.column_span),
            ) else {
                return Err(LayoutError::OutOfBounds {
                    coord: anchor,
                    rows,
                    columns,
                });
            };
            for row in seat.row..row_end {
                for col in seat.column..col_end {
                    let coord = CellCoord::new(row, col);
                    if !grid.get(coord)?.is_empty() {
                        return Err(LayoutError::OverlappingSeat {
                            label: label.to_string(),
                            coord,
                        });
                    }
                    grid.set(
                        coord,
                        Cell {
                            label: label.to_string(),
                            category: seat.category,
                            is_continuation: coord != anchor,
                        },
                    )?;
                }
            }
            painted += 1;
        }

        debug!(
            "DeckGrid: hydrated {} seats onto {}x{} deck",
            painted, rows, columns
        );
        Ok(grid)
    }
}

/// A saved seat must be a straight run within the span caps, and its category
/// must match its size: one cell is a seater, more is a sleeper.
fn check_saved_shape(label: &str, seat: &SavedSeat) -> Result<(), LayoutError> {
    let invalid = |reason: String| LayoutError::InvalidSavedSeat {
        label: label.to_string(),
        reason,
    };
    if seat.row_span > 1 && seat.column_span > 1 {
        return Err(invalid(format!(
            "span {}x{} covers more than one row and column",
            seat.row_span, seat.column_span
        )));
    }
    if seat.column_span > MAX_HORIZONTAL_SPAN {
        return Err(invalid(format!(
            "{} horizontal cells, at most {} allowed",
            seat.column_span, MAX_HORIZONTAL_SPAN
        )));
    }
    if seat.row_span > MAX_VERTICAL_SPAN {
        return Err(invalid(format!(
            "{} vertical cells, at most {} allowed",
            seat.row_span, MAX_VERTICAL_SPAN
        )));
    }
    let expected = if seat.cell_count() == 1 {
        SeatCategory::Seater
    } else {
        SeatCategory::Sleeper
    };
    if seat.category != expected {
        return Err(invalid(format!(
            "category {:?} does not fit {} cell(s)",
            seat.category,
            seat.cell_count()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::deck_cell::Deck;

    fn saved(label: &str, row: usize, column: usize, row_span: usize, column_span: usize) -> SavedSeat {
        SavedSeat {
            label: label.to_string(),
            row,
            column,
            row_span,
            column_span,
            category: if row_span * column_span > 1 {
                SeatCategory::Sleeper
            } else {
                SeatCategory::Seater
            },
            active: true,
            deck: Deck::Lower,
        }
    }

    #[test]
    fn test_create_empty() {
        let grid = DeckGrid::create_empty(15, 4);
        assert_eq!(grid.rows(), 15);
        assert_eq!(grid.columns(), 4);
        assert!(grid.is_empty());
        assert_eq!(grid.get(CellCoord::new(14, 3)).unwrap(), &Cell::empty());
        assert_eq!(grid.labels().count(), 0);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = DeckGrid::create_empty(2, 2);
        assert!(matches!(
            grid.get(CellCoord::new(2, 0)),
            Err(LayoutError::OutOfBounds { rows: 2, columns: 2, .. })
        ));
        assert!(grid.get(CellCoord::new(0, 2)).is_err());
    }

    #[test]
    fn test_set_keeps_label_index() {
        let mut grid = DeckGrid::create_empty(3, 3);
        let a = CellCoord::new(0, 0);
        let b = CellCoord::new(0, 1);
        grid.set(a, Cell::seater("1")).unwrap();
        grid.set(b, Cell::seater("1")).unwrap();
        assert_eq!(grid.cells_with_label("1").unwrap().len(), 2);

        let previous = grid.set(a, Cell::seater("2")).unwrap();
        assert_eq!(previous.label, "1");
        assert_eq!(grid.cells_with_label("1").unwrap().iter().collect::<Vec<_>>(), vec![&b]);
        assert!(grid.cells_with_label("2").unwrap().contains(&a));

        grid.set(b, Cell::empty()).unwrap();
        assert!(grid.cells_with_label("1").is_none());
    }

    #[test]
    fn test_set_out_of_bounds_leaves_grid() {
        let mut grid = DeckGrid::create_empty(1, 1);
        let before = grid.clone();
        assert!(grid.set(CellCoord::new(1, 1), Cell::seater("9")).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_hydrate_marks_continuations() {
        let seats = vec![saved("1", 0, 0, 1, 2), saved("2", 1, 3, 2, 1), saved("3", 4, 2, 1, 1)];
        let grid = DeckGrid::hydrate(15, 4, &seats).unwrap();

        let anchor = grid.get(CellCoord::new(0, 0)).unwrap();
        assert_eq!(anchor.category, SeatCategory::Sleeper);
        assert!(!anchor.is_continuation);
        assert!(grid.get(CellCoord::new(0, 1)).unwrap().is_continuation);
        assert!(grid.get(CellCoord::new(2, 3)).unwrap().is_continuation);
        assert_eq!(grid.get(CellCoord::new(4, 2)).unwrap(), &Cell::seater("3"));

        let summary = grid.summary();
        assert_eq!(summary.seaters, 1);
        assert_eq!(summary.sleepers, 2);
        assert_eq!(summary.occupied_cells, 5);
        assert_eq!(summary.seats(), 3);
    }

    #[test]
    fn test_hydrate_skips_inactive() {
        let mut retired = saved("4", 0, 0, 1, 1);
        retired.active = false;
        let grid = DeckGrid::hydrate(2, 2, &[retired]).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_hydrate_rejects_overflow_and_overlap() {
        assert!(matches!(
            DeckGrid::hydrate(2, 2, &[saved("1", 1, 1, 1, 2)]),
            Err(LayoutError::OutOfBounds { .. })
        ));
        assert!(matches!(
            DeckGrid::hydrate(3, 3, &[saved("1", 0, 0, 1, 2), saved("2", 0, 1, 1, 1)]),
            Err(LayoutError::OverlappingSeat { .. })
        ));
        assert!(matches!(
            DeckGrid::hydrate(3, 3, &[saved("1", 0, 0, 0, 1)]),
            Err(LayoutError::InvalidSavedSeat { .. })
        ));
        assert!(matches!(
            DeckGrid::hydrate(3, 3, &[saved("1", 0, 0, 1, 1), saved("1", 2, 2, 1, 1)]),
            Err(LayoutError::InvalidSavedSeat { .. })
        ));
    }

    fn with_category(mut seat: SavedSeat, category: SeatCategory) -> SavedSeat {
        seat.category = category;
        seat
    }

    #[test]
    fn test_hydrate_rejects_bad_seat_shapes() {
        let bad = [
            saved("B", 0, 0, 2, 2),
            saved("W", 0, 0, 1, 5),
            saved("T", 0, 0, 3, 1),
            with_category(saved("S", 0, 0, 1, 2), SeatCategory::Seater),
            with_category(saved("L", 0, 0, 1, 1), SeatCategory::Sleeper),
            with_category(saved("E", 0, 0, 1, 1), SeatCategory::Empty),
        ];
        for seat in bad {
            let result = DeckGrid::hydrate(15, 8, std::slice::from_ref(&seat));
            assert!(
                matches!(result, Err(LayoutError::InvalidSavedSeat { .. })),
                "seat '{}' was accepted: {:?}",
                seat.label,
                result
            );
        }
    }

    #[test]
    fn test_hydrate_huge_span_or_anchor_is_rejected() {
        let tall = saved("1", 1, 0, usize::MAX, 1);
        assert!(matches!(
            DeckGrid::hydrate(3, 4, &[tall]),
            Err(LayoutError::InvalidSavedSeat { .. })
        ));
        let far = saved("2", usize::MAX, 0, 2, 1);
        assert!(matches!(
            DeckGrid::hydrate(3, 4, &[far]),
            Err(LayoutError::OutOfBounds { .. })
        ));
        let wide = saved("3", 0, usize::MAX - 1, 1, 4);
        assert!(matches!(
            DeckGrid::hydrate(3, 4, &[wide]),
            Err(LayoutError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_hydrated_sleeper_clears_as_a_whole() {
        let mut grid = DeckGrid::hydrate(3, 4, &[saved("X", 0, 0, 1, 2)]).unwrap();
        crate::layout::mutator::clear_cell(&mut grid, CellCoord::new(0, 0)).unwrap();
        assert!(grid.is_empty());
    }
}
