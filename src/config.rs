//! Itinerary configuration.
//!
//! Loaded from `~/.itinerary/config.toml`, or from a path given with
//! `--config`. Every key is optional; a missing default file means defaults.
//!
//! ```toml
//! day-start = "7:30 AM"
//!
//! [map]
//! zoom = 13.0
//! marker-color = "#3498db"
//! selected-marker-color = "#e74c3c"
//!
//! [map.route-colors]
//! walk = "#27ae60"
//! bus = "#f39c12"
//! train = "#e74c3c"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::map::MapStyle;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config at {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Itinerary configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Where the running clock starts when no fixed time comes first.
    pub day_start: ClockTime,

    /// Styling handed to the map view.
    pub map: MapStyle,
}

impl Config {
    /// Load config from the default path, falling back to defaults if the
    /// file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file exists but can't be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                log::warn!("could not determine home directory, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load config from an explicit path. The file must exist.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file can't be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// The config file path: `~/.itinerary/config.toml`.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".itinerary").join("config.toml"))
    }
}
