// src/layout/error.rs

use thiserror::Error;

use super::deck_cell::CellCoord;

/// Errors raised while editing or hydrating a deck grid.
/// Every variant is recoverable: the grid is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Cell {coord} is outside the {rows}x{columns} deck.")]
    OutOfBounds {
        coord: CellCoord,
        rows: usize,
        columns: usize,
    },
    #[error("Seat number '{0}' may only contain letters and digits.")]
    InvalidLabel(String),
    #[error("Seat '{label}' must stay in a single row or a single column.")]
    NotCollinear { label: String },
    #[error("Seat '{label}' must occupy neighbouring cells without gaps.")]
    NotContiguous { label: String },
    #[error("Seat '{label}' would cover {cells} {axis} cells; at most {max} are allowed.")]
    SpanExceeded {
        label: String,
        axis: &'static str,
        cells: usize,
        max: usize,
    },
    #[error("Deck bounds {rows}x{columns} are invalid (allowed 1..={max_rows} rows, 1..={max_columns} columns).")]
    InvalidBounds {
        rows: usize,
        columns: usize,
        max_rows: usize,
        max_columns: usize,
    },
    #[error("Saved seat '{label}' overlaps another seat at {coord}.")]
    OverlappingSeat { label: String, coord: CellCoord },
    #[error("Saved seat '{label}' is malformed: {reason}")]
    InvalidSavedSeat { label: String, reason: String },
}

/// Errors returned by the bus-management REST collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),
    /// Non-success status; `message` is the collaborator's text, shown to the operator as-is.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
