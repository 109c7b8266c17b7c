// src/layout/mod.rs

// --- Model ---
pub mod bus_metadata;
pub mod deck_cell;
pub mod deck_grid;
pub mod error;

// --- Editing and validation ---
pub mod mutator;
pub mod sleeper;
pub mod submit;

// --- Collaborator and Bevy wiring ---
pub mod client;
pub mod events;
pub mod plugin;
pub mod resources;
pub(crate) mod handler;
pub(crate) mod processes;

pub use deck_cell::{Cell, CellCoord, Deck, SeatCategory};
pub use deck_grid::DeckGrid;
pub use plugin::SeatLayoutPlugin;
pub use resources::SeatLayoutEditor;
