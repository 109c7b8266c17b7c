// src/settings/io.rs
use bevy::log::{debug, error, info, warn};
use directories_next::ProjectDirs;
use std::fs;
use std::io::{self, BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use super::{AppSettings, SettingsStore};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "SeatDeck";
const APPLICATION: &str = "SeatDeckEditor";
const CONFIG_FILE: &str = "app_settings.json";

/// Default settings location in the platform config directory.
pub fn default_settings_path() -> io::Result<PathBuf> {
    let proj_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        io::Error::new(
            ErrorKind::NotFound,
            "Could not determine project directories for app settings.",
        )
    })?;
    let config_dir = proj_dirs.config_dir();
    fs::create_dir_all(config_dir)?;
    Ok(config_dir.join(CONFIG_FILE))
}

/// Reads settings from `path`; a missing file yields the defaults.
pub fn load_settings_from(path: &Path) -> io::Result<AppSettings> {
    match fs::File::open(path) {
        Ok(file) => serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            error!("AppSettings: Failed to parse settings file {:?}: {}", path, e);
            io::Error::new(ErrorKind::InvalidData, format!("Failed to parse settings file: {}", e))
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("AppSettings: No settings at {:?}, using defaults.", path);
            Ok(AppSettings::default())
        }
        Err(e) => {
            error!("AppSettings: Failed to open settings file {:?}: {}", path, e);
            Err(e)
        }
    }
}

pub fn save_settings_to(path: &Path, settings: &AppSettings) -> io::Result<()> {
    info!("AppSettings: Saving settings to {:?}", path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(writer, settings).map_err(|e| {
        error!("AppSettings: Failed to serialize settings to {:?}: {}", path, e);
        io::Error::other(e)
    })
}

/// Settings for this run: the file (explicit path or default location), then
/// `.env`, then process environment. Errors fall back to defaults.
pub fn resolve_settings(explicit_path: Option<&Path>) -> SettingsStore {
    match dotenvy::dotenv() {
        Ok(path) => debug!("AppSettings: loaded environment from {:?}", path),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("AppSettings: ignoring unreadable .env: {}", e),
    }

    let path = match explicit_path {
        Some(path) => Ok(path.to_path_buf()),
        None => default_settings_path(),
    };
    let (mut settings, path) = match path {
        Ok(path) => match load_settings_from(&path) {
            Ok(settings) => (settings, Some(path)),
            Err(e) => {
                error!("AppSettings: {}. Using defaults.", e);
                (AppSettings::default(), Some(path))
            }
        },
        Err(e) => {
            error!("AppSettings: {}. Using defaults; settings will not be saved.", e);
            (AppSettings::default(), None)
        }
    };
    settings.apply_env_overrides(|key| std::env::var(key).ok());
    SettingsStore { settings, path }
}

impl SettingsStore {
    /// Writes the current settings back to where they were read from.
    pub fn save(&self) -> io::Result<()> {
        match &self.path {
            Some(path) => save_settings_to(path, &self.settings),
            None => Err(io::Error::new(
                ErrorKind::NotFound,
                "No settings location is available on this system.",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("seatdeck-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = scratch_file("does_not_exist.json");
        let _ = fs::remove_file(&path);
        assert_eq!(load_settings_from(&path).unwrap(), AppSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_file("saved.json");
        let settings = AppSettings {
            api_base_url: "https://fleet.example.com/api".to_string(),
            default_bus_id: Some("B12".to_string()),
        };
        save_settings_to(&path, &settings).unwrap();
        assert_eq!(load_settings_from(&path).unwrap(), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_store_save_writes_to_its_path() {
        let path = scratch_file("store.json");
        let mut store = SettingsStore {
            settings: AppSettings::default(),
            path: Some(path.clone()),
        };
        store.settings.default_bus_id = Some("KA-09".to_string());
        store.save().unwrap();
        assert_eq!(load_settings_from(&path).unwrap().default_bus_id.as_deref(), Some("KA-09"));
        let _ = fs::remove_file(&path);

        let nowhere = SettingsStore {
            settings: AppSettings::default(),
            path: None,
        };
        assert_eq!(nowhere.save().unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_corrupt_file_is_invalid_data() {
        let path = scratch_file("corrupt.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_settings_from(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        let _ = fs::remove_file(&path);
    }
}
