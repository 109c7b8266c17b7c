// src/layout/deck_cell.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which deck of the bus a grid describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deck {
    #[default]
    Lower,
    Upper,
}

impl Deck {
    pub const ALL: [Deck; 2] = [Deck::Lower, Deck::Upper];

    pub fn title(self) -> &'static str {
        match self {
            Deck::Lower => "Lower deck",
            Deck::Upper => "Upper deck",
        }
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deck::Lower => write!(f, "lower"),
            Deck::Upper => write!(f, "upper"),
        }
    }
}

/// Grid position. Ordering is row-major, so the smallest coordinate of a
/// seat group is always its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatCategory {
    #[default]
    Empty,
    Seater,
    Sleeper,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub label: String,
    pub category: SeatCategory,
    /// True for every sleeper cell except the anchor.
    pub is_continuation: bool,
}

impl Cell {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn seater(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            category: SeatCategory::Seater,
            is_continuation: false,
        }
    }

    pub fn sleeper(label: impl Into<String>, is_continuation: bool) -> Self {
        Self {
            label: label.into(),
            category: SeatCategory::Sleeper,
            is_continuation,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category == SeatCategory::Empty
    }
}
