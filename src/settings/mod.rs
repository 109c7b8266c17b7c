pub mod credentials;
pub mod io;

use bevy::log::info;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

pub const ENV_API_BASE_URL: &str = "SEATDECK_API_BASE_URL";
pub const ENV_BUS_ID: &str = "SEATDECK_BUS_ID";
pub const ENV_API_TOKEN: &str = "SEATDECK_API_TOKEN";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    pub api_base_url: String,
    pub default_bus_id: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_bus_id: None,
        }
    }
}

/// Settings in use plus the file they are saved to.
#[derive(Resource, Debug, Clone)]
pub struct SettingsStore {
    pub settings: AppSettings,
    /// `None` when no config directory could be determined.
    pub path: Option<PathBuf>,
}

impl AppSettings {
    /// Applies environment overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
            info!("AppSettings: API base URL overridden by {}", ENV_API_BASE_URL);
            self.api_base_url = url.trim().to_string();
        }
        if let Some(bus_id) = lookup(ENV_BUS_ID).filter(|v| !v.trim().is_empty()) {
            info!("AppSettings: default bus overridden by {}", ENV_BUS_ID);
            self.default_bus_id = Some(bus_id.trim().to_string());
        }
    }
}
