// src/config.rs
use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument, trace, warn};

pub const STORE_PATH_ENV: &str = "ORIBY_STORE_PATH";
pub const FETCH_TIMEOUT_ENV: &str = "ORIBY_FETCH_TIMEOUT";

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Path to the SQLite file holding all namespaces
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Timeout for fetching the server bookmark document, in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/oriby")
}

fn default_store_path() -> String {
    config_dir().join("oriby.db").to_string_lossy().into_owned()
}

fn default_fetch_timeout() -> Option<u64> {
    Some(DEFAULT_FETCH_TIMEOUT_SECS)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str::<Settings>(&text).map_err(|e| {
        DomainError::Other(format!("Invalid config file {}: {}", path.display(), e))
    })
}

/// Load settings: defaults, then the config file, then environment variables.
///
/// An explicitly given config file must exist and parse. The default
/// `~/.config/oriby/config.toml` is optional.
#[instrument(level = "debug")]
pub fn load_settings(config_file: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_file {
        Some(path) => {
            debug!("Loading config from: {:?}", path);
            read_config_file(path)?
        }
        None => {
            let default_path = config_dir().join("config.toml");
            if default_path.exists() {
                trace!("Loading config from: {:?}", default_path);
                read_config_file(&default_path).unwrap_or_else(|e| {
                    warn!("Ignoring config file: {}", e);
                    Settings::default()
                })
            } else {
                Settings::default()
            }
        }
    };

    if let Ok(store_path) = std::env::var(STORE_PATH_ENV) {
        trace!("Using {} from environment: {}", STORE_PATH_ENV, store_path);
        settings.store_path = store_path;
    }

    if let Ok(timeout) = std::env::var(FETCH_TIMEOUT_ENV) {
        match timeout.trim().parse::<u64>() {
            Ok(0) => settings.fetch_timeout_secs = None,
            Ok(secs) => settings.fetch_timeout_secs = Some(secs),
            Err(_) => warn!("Ignoring non-numeric {}='{}'", FETCH_TIMEOUT_ENV, timeout),
        }
    }

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    toml::to_string_pretty(&Settings::default())
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
