mod app_config;

pub use app_config::*;

use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Global configuration, replaced once at startup by [`init_config`]
pub static CONFIG: LazyLock<RwLock<Config>> = LazyLock::new(|| RwLock::new(Config::default()));

impl Config {
    /// Get the config file path (config.json in the config directory)
    pub fn path() -> PathBuf {
        const FILENAME: &str = "config.json";
        if let Some(mut path) = dirs::config_dir() {
            path.push("tripane");
            path.push(FILENAME);
            return path;
        }

        if let Some(mut path) = dirs::home_dir() {
            path.push(".tripane");
            path.push(FILENAME);
            return path;
        }

        PathBuf::from(FILENAME)
    }

    /// Read a config file; missing fields take their defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config from the default location.
    ///
    /// A missing file is the default config; a broken one is logged and ignored.
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(%e, "Ignoring config file");
                Self::default()
            }
        }
    }
}

/// Load the configuration and install it as [`CONFIG`].
///
/// An explicitly requested file must exist and parse; the default one may not.
pub fn init_config(explicit: Option<&Path>) -> Result<(), ConfigError> {
    let config = match explicit {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    tracing::debug!(?config, "Configuration loaded");
    *CONFIG.write() = config;
    Ok(())
}
