// src/main.rs

#![cfg_attr(all(not(debug_assertions), target_os = "windows"), windows_subsystem = "windows")]

use bevy::{
    log::LogPlugin,
    prelude::*,
    window::WindowPlugin,
    winit::{UpdateMode, WinitSettings},
};
use bevy_egui::EguiPlugin;
use bevy_tokio_tasks::TokioTasksPlugin;
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

mod cli;
mod layout;
mod settings;
mod ui;

use cli::{Cli, Commands};
use layout::SeatLayoutPlugin;
use settings::credentials;
use ui::EditorUiPlugin;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        return run_command(command);
    }

    let mut store = settings::io::resolve_settings(cli.config.as_deref());
    if let Some(api_base) = cli.api_base.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        store.settings.api_base_url = api_base.to_string();
    }
    let api_base_url = store.settings.api_base_url.clone();
    let initial_bus_id = cli
        .bus_id
        .or_else(|| store.settings.default_bus_id.clone())
        .filter(|id| !id.trim().is_empty());
    let api_token = credentials::load_api_token();

    let exit = App::new()
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::Continuous,
            unfocused_mode: UpdateMode::reactive_low_power(Duration::from_secs_f32(1.0 / 5.0)),
        })
        .insert_resource(store)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "SeatDeck - Bus Seat Layout Editor".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "wgpu=error,naga=warn,bevy_tokio_tasks=warn".to_string(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        })
        .add_plugins(TokioTasksPlugin::default())
        .add_plugins(SeatLayoutPlugin {
            api_base_url,
            api_token,
            initial_bus_id: initial_bus_id.clone(),
        })
        .add_plugins(EditorUiPlugin { initial_bus_id })
        .run();

    if exit.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Subcommands run without opening a window.
fn run_command(command: Commands) -> ExitCode {
    match command {
        Commands::Validate { path, rows, columns } => {
            match cli::validate_layout::run(&path, rows, columns) {
                Ok(true) => ExitCode::SUCCESS,
                Ok(false) => ExitCode::FAILURE,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(2)
                }
            }
        }
        Commands::SetToken { token } => {
            if token.trim().is_empty() {
                eprintln!("Error: token is empty.");
                return ExitCode::from(2);
            }
            match credentials::store_api_token(&token) {
                Ok(()) => {
                    println!("API token stored in the system keyring.");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: could not store token: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::ClearToken => match credentials::clear_api_token() {
            Ok(()) => {
                println!("API token removed.");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: could not clear token: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}
