// src/layout/bus_metadata.rs
use serde::{Deserialize, Serialize};

use super::deck_cell::{Deck, SeatCategory};
use super::error::LayoutError;

pub const MAX_DECK_ROWS: usize = 15;
pub const MAX_DECK_COLUMNS: usize = 4;

/// Bus record as returned by the bus-management API. Both decks share its bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusMetadata {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

impl BusMetadata {
    /// Returns `(rows, columns)` once they pass the fleet limits.
    pub fn deck_bounds(&self) -> Result<(usize, usize), LayoutError> {
        validate_bounds(self.rows, self.columns)?;
        Ok((self.rows, self.columns))
    }
}

pub fn validate_bounds(rows: usize, columns: usize) -> Result<(), LayoutError> {
    if rows == 0 || columns == 0 || rows > MAX_DECK_ROWS || columns > MAX_DECK_COLUMNS {
        return Err(LayoutError::InvalidBounds {
            rows,
            columns,
            max_rows: MAX_DECK_ROWS,
            max_columns: MAX_DECK_COLUMNS,
        });
    }
    Ok(())
}

fn default_span() -> usize {
    1
}

fn default_active() -> bool {
    true
}

/// One persisted seat: the anchor cell plus how far it extends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSeat {
    pub label: String,
    pub row: usize,
    pub column: usize,
    #[serde(default = "default_span")]
    pub row_span: usize,
    #[serde(default = "default_span")]
    pub column_span: usize,
    pub category: SeatCategory,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub deck: Deck,
}

impl SavedSeat {
    pub fn cell_count(&self) -> usize {
        self.row_span * self.column_span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_limits() {
        assert!(validate_bounds(15, 4).is_ok());
        assert!(validate_bounds(1, 1).is_ok());
        assert!(matches!(validate_bounds(16, 4), Err(LayoutError::InvalidBounds { .. })));
        assert!(matches!(validate_bounds(10, 5), Err(LayoutError::InvalidBounds { .. })));
        assert!(matches!(validate_bounds(0, 2), Err(LayoutError::InvalidBounds { .. })));
    }

    #[test]
    fn test_saved_seat_defaults() {
        let json = r#"{"label":"A1","row":2,"column":0,"category":"SEATER"}"#;
        let seat: SavedSeat = serde_json::from_str(json).unwrap();
        assert_eq!(seat.row_span, 1);
        assert_eq!(seat.column_span, 1);
        assert!(seat.active);
        assert_eq!(seat.deck, Deck::Lower);
    }

    #[test]
    fn test_saved_seat_camel_case() {
        let json = r#"{"label":"7","row":0,"column":1,"rowSpan":2,"columnSpan":1,"category":"SLEEPER","active":false,"deck":"upper"}"#;
        let seat: SavedSeat = serde_json::from_str(json).unwrap();
        assert_eq!(seat.row_span, 2);
        assert_eq!(seat.category, SeatCategory::Sleeper);
        assert!(!seat.active);
        assert_eq!(seat.deck, Deck::Upper);
        assert_eq!(seat.cell_count(), 2);
    }
}
