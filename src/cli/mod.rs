// src/cli/mod.rs
// Command line entry points: launching the editor and offline layout tools

pub mod validate_layout;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::layout::bus_metadata::{MAX_DECK_COLUMNS, MAX_DECK_ROWS};

#[derive(Parser, Debug)]
#[command(name = "seatdeck")]
#[command(about = "SeatDeck - bus seat layout editor", long_about = None)]
pub struct Cli {
    /// Bus to load as soon as the editor opens
    #[arg(long)]
    pub bus_id: Option<String>,

    /// Base URL of the bus-management API (overrides settings and environment)
    #[arg(long)]
    pub api_base: Option<String>,

    /// Settings file to use instead of the platform default
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a saved seat list (JSON array) without opening the editor
    Validate {
        /// Path to the JSON file
        path: PathBuf,
        /// Deck rows
        #[arg(long, default_value_t = MAX_DECK_ROWS)]
        rows: usize,
        /// Deck columns
        #[arg(long, default_value_t = MAX_DECK_COLUMNS)]
        columns: usize,
    },

    /// Store the API token in the OS keyring
    SetToken {
        token: String,
    },

    /// Remove the stored API token
    ClearToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_editor_flags() {
        let cli = Cli::try_parse_from(["seatdeck", "--bus-id", "B4", "--api-base", "http://h/api"]).unwrap();
        assert_eq!(cli.bus_id.as_deref(), Some("B4"));
        assert_eq!(cli.api_base.as_deref(), Some("http://h/api"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_validate_defaults() {
        let cli = Cli::try_parse_from(["seatdeck", "validate", "seats.json"]).unwrap();
        match cli.command {
            Some(Commands::Validate { path, rows, columns }) => {
                assert_eq!(path, PathBuf::from("seats.json"));
                assert_eq!(rows, 15);
                assert_eq!(columns, 4);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
