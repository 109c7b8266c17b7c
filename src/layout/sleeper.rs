// src/layout/sleeper.rs
//! Shape classification for a group of cells that share one seat number.
//! This is the only place that decides whether a group forms a legal seat.

use std::collections::BTreeSet;

use super::deck_cell::CellCoord;
use super::error::LayoutError;

pub const MAX_HORIZONTAL_SPAN: usize = 4;
pub const MAX_VERTICAL_SPAN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeViolation {
    Empty,
    NotCollinear,
    NotContiguous,
    SpanExceeded {
        axis: &'static str,
        cells: usize,
        max: usize,
    },
}

impl ShapeViolation {
    pub fn into_error(self, label: &str) -> LayoutError {
        let label = label.to_string();
        match self {
            // An empty group has no cells to be out of line; report it as a gap.
            ShapeViolation::Empty | ShapeViolation::NotContiguous => {
                LayoutError::NotContiguous { label }
            }
            ShapeViolation::NotCollinear => LayoutError::NotCollinear { label },
            ShapeViolation::SpanExceeded { axis, cells, max } => LayoutError::SpanExceeded {
                label,
                axis,
                cells,
                max,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatShape {
    Singleton(CellCoord),
    Horizontal {
        row: usize,
        min_col: usize,
        max_col: usize,
    },
    Vertical {
        col: usize,
        min_row: usize,
        max_row: usize,
    },
    Invalid(ShapeViolation),
}

impl SeatShape {
    pub fn is_valid(&self) -> bool {
        !matches!(self, SeatShape::Invalid(_))
    }

    /// Number of cells the shape covers; zero for invalid shapes.
    pub fn cell_count(&self) -> usize {
        match *self {
            SeatShape::Singleton(_) => 1,
            SeatShape::Horizontal { min_col, max_col, .. } => max_col - min_col + 1,
            SeatShape::Vertical { min_row, max_row, .. } => max_row - min_row + 1,
            SeatShape::Invalid(_) => 0,
        }
    }
}

/// Classifies `cells`. Checks run in order: collinear, contiguous, span cap.
pub fn classify(cells: &BTreeSet<CellCoord>) -> SeatShape {
    let Some(first) = cells.iter().next().copied() else {
        return SeatShape::Invalid(ShapeViolation::Empty);
    };
    let count = cells.len();
    if count == 1 {
        return SeatShape::Singleton(first);
    }

    let same_row = cells.iter().all(|c| c.row == first.row);
    let same_col = cells.iter().all(|c| c.col == first.col);

    if same_row {
        // BTreeSet order is row-major, so within one row the columns ascend.
        let min_col = first.col;
        let max_col = cells.iter().next_back().map_or(min_col, |c| c.col);
        if max_col - min_col + 1 != count {
            return SeatShape::Invalid(ShapeViolation::NotContiguous);
        }
        if count > MAX_HORIZONTAL_SPAN {
            return SeatShape::Invalid(ShapeViolation::SpanExceeded {
                axis: "horizontal",
                cells: count,
                max: MAX_HORIZONTAL_SPAN,
            });
        }
        SeatShape::Horizontal {
            row: first.row,
            min_col,
            max_col,
        }
    } else if same_col {
        let min_row = first.row;
        let max_row = cells.iter().next_back().map_or(min_row, |c| c.row);
        if max_row - min_row + 1 != count {
            return SeatShape::Invalid(ShapeViolation::NotContiguous);
        }
        if count > MAX_VERTICAL_SPAN {
            return SeatShape::Invalid(ShapeViolation::SpanExceeded {
                axis: "vertical",
                cells: count,
                max: MAX_VERTICAL_SPAN,
            });
        }
        SeatShape::Vertical {
            col: first.col,
            min_row,
            max_row,
        }
    } else {
        SeatShape::Invalid(ShapeViolation::NotCollinear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(coords: &[(usize, usize)]) -> BTreeSet<CellCoord> {
        coords.iter().map(|&(r, c)| CellCoord::new(r, c)).collect()
    }

    #[test]
    fn test_empty_and_singleton() {
        assert_eq!(classify(&BTreeSet::new()), SeatShape::Invalid(ShapeViolation::Empty));
        assert_eq!(
            classify(&set(&[(3, 1)])),
            SeatShape::Singleton(CellCoord::new(3, 1))
        );
    }

    #[test]
    fn test_horizontal_runs() {
        assert_eq!(
            classify(&set(&[(0, 1), (0, 0)])),
            SeatShape::Horizontal { row: 0, min_col: 0, max_col: 1 }
        );
        let four = classify(&set(&[(2, 0), (2, 1), (2, 2), (2, 3)]));
        assert_eq!(four, SeatShape::Horizontal { row: 2, min_col: 0, max_col: 3 });
        assert_eq!(four.cell_count(), 4);
    }

    #[test]
    fn test_horizontal_cap() {
        assert_eq!(
            classify(&set(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)])),
            SeatShape::Invalid(ShapeViolation::SpanExceeded {
                axis: "horizontal",
                cells: 5,
                max: MAX_HORIZONTAL_SPAN
            })
        );
    }

    #[test]
    fn test_vertical_runs_and_cap() {
        assert_eq!(
            classify(&set(&[(4, 2), (5, 2)])),
            SeatShape::Vertical { col: 2, min_row: 4, max_row: 5 }
        );
        assert!(matches!(
            classify(&set(&[(0, 0), (1, 0), (2, 0)])),
            SeatShape::Invalid(ShapeViolation::SpanExceeded { axis: "vertical", cells: 3, max: 2 })
        ));
    }

    #[test]
    fn test_gaps_and_shapes() {
        assert_eq!(
            classify(&set(&[(0, 0), (2, 0)])),
            SeatShape::Invalid(ShapeViolation::NotContiguous)
        );
        assert_eq!(
            classify(&set(&[(1, 0), (1, 2)])),
            SeatShape::Invalid(ShapeViolation::NotContiguous)
        );
        assert_eq!(
            classify(&set(&[(0, 0), (1, 1)])),
            SeatShape::Invalid(ShapeViolation::NotCollinear)
        );
        assert_eq!(
            classify(&set(&[(0, 0), (0, 1), (1, 1)])),
            SeatShape::Invalid(ShapeViolation::NotCollinear)
        );
        assert!(!classify(&set(&[(0, 0), (1, 1)])).is_valid());
        assert_eq!(classify(&set(&[(0, 0), (1, 1)])).cell_count(), 0);
    }

    #[test]
    fn test_violation_errors() {
        assert_eq!(
            ShapeViolation::NotCollinear.into_error("2"),
            LayoutError::NotCollinear { label: "2".to_string() }
        );
        let err = ShapeViolation::SpanExceeded { axis: "vertical", cells: 3, max: 2 }.into_error("7");
        assert_eq!(
            err.to_string(),
            "Seat '7' would cover 3 vertical cells; at most 2 are allowed."
        );
    }
}
