// src/settings/credentials.rs
//! API token storage in the OS keyring.

use bevy::log::{error, info};

use super::ENV_API_TOKEN;

const KEYRING_SERVICE_NAME: &str = "seatdeck_bus_api";
const KEYRING_TOKEN_USERNAME: &str = "api_token";

fn entry() -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE_NAME, KEYRING_TOKEN_USERNAME)
}

/// Token from `SEATDECK_API_TOKEN`, else from the keyring, else none.
pub fn load_api_token() -> Option<String> {
    if let Some(token) = std::env::var(ENV_API_TOKEN).ok().filter(|t| !t.trim().is_empty()) {
        info!("Credentials: using API token from {}.", ENV_API_TOKEN);
        return Some(token.trim().to_string());
    }
    match entry().and_then(|e| e.get_password()) {
        Ok(token) => {
            info!("Credentials: API token found in keyring.");
            Some(token)
        }
        Err(keyring::Error::NoEntry) => {
            info!("Credentials: no API token in keyring.");
            None
        }
        Err(e) => {
            error!("Credentials: error accessing keyring: {}", e);
            None
        }
    }
}

pub fn store_api_token(token: &str) -> Result<(), keyring::Error> {
    entry()?.set_password(token.trim())?;
    info!("Credentials: API token stored in keyring.");
    Ok(())
}

pub fn clear_api_token() -> Result<(), keyring::Error> {
    match entry()?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => {
            info!("Credentials: API token removed from keyring.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
