//! The itinerary: an ordered, immutable snapshot of a trip.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::entry::{Entry, Place};
use crate::schedule::{self, ScheduleError};

/// An ordered sequence of entries. Order is the chronological order of the trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Display title for the list view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub entries: Vec<Entry>,
}

impl Itinerary {
    #[must_use]
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            title: None,
            entries,
        }
    }

    /// Places only, in trip order.
    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Place(p) => Some(p),
            Entry::Travel(_) => None,
        })
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Checks unique ids and non-negative durations.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScheduleError`] found.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        schedule::validate(&self.entries)
    }

    /// SHA-256 of the entries' canonical JSON, hex encoded.
    ///
    /// Identical entry sequences always produce the same fingerprint. The
    /// title is not part of it: renaming a trip does not change its schedule.
    ///
    /// # Errors
    ///
    /// Fails only if the entries can't be serialized.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(&self.entries)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}
