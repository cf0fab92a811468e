//! Derived schedule types.

use serde::Serialize;

use super::entry::Entry;

/// An entry paired with its derived display time.
///
/// Never stored: recomputed from the itinerary whenever it is needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEntry<'a> {
    pub entry: &'a Entry,

    /// `"H:MM AM"`. For fixed entries, the input string verbatim.
    pub start_time: String,

    /// True when the time came from the input rather than accumulation.
    pub is_fixed: bool,
}
