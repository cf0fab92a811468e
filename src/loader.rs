//! Loading itineraries from data files.
//!
//! Two formats, chosen by extension:
//!
//! ```text
//! trip.json   # a bare array of entries, or { "title": ..., "entries": [...] }
//! trip.toml   # title = "..." followed by [[entries]] tables
//! ```
//!
//! Structural checks (unique ids, non-negative durations) run on load, so a
//! bad file is reported before anything is rendered.

use std::{fs, io, path::Path};

use crate::model::Itinerary;
use crate::schedule::ScheduleError;

/// Errors that can occur while loading an itinerary.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported itinerary format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("invalid itinerary: {0}")]
    Invalid(#[from] ScheduleError),
}

pub type Result<T> = core::result::Result<T, LoadError>;

/// Format of an itinerary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// # Errors
    ///
    /// Returns [`LoadError::UnsupportedFormat`] unless the extension is
    /// `json` or `toml`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Reads, parses, and validates an itinerary file.
///
/// # Errors
///
/// Returns a [`LoadError`] if the extension is unknown, the file can't be
/// read, it doesn't parse, or it fails validation.
pub fn load(path: &Path) -> Result<Itinerary> {
    let format = Format::from_path(path)?;
    let contents = fs::read_to_string(path)?;
    let itinerary = parse(&contents, format)?;
    log::debug!(
        "loaded {} entries from {}",
        itinerary.entries.len(),
        path.display()
    );
    Ok(itinerary)
}

/// Parses and validates itinerary text.
///
/// # Errors
///
/// Returns a [`LoadError`] if the text doesn't parse or fails validation.
pub fn parse(contents: &str, format: Format) -> Result<Itinerary> {
    let itinerary = match format {
        Format::Json => {
            let value: serde_json::Value = serde_json::from_str(contents)?;
            if value.is_array() {
                Itinerary::new(serde_json::from_value(value)?)
            } else {
                serde_json::from_value(value)?
            }
        }
        Format::Toml => toml::from_str(contents)?,
    };
    itinerary.validate()?;
    Ok(itinerary)
}
