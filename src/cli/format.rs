//! Output formatting for CLI display.

use serde::Serialize;

use crate::clock::format_minutes;
use crate::model::{Entry, ScheduledEntry};

/// Default heading when an itinerary has no title.
const UNTITLED: &str = "Itinerary";

/// The list view as plain text.
///
/// Places are numbered and show their time, with `*` marking a fixed time,
/// and a map link. Travel legs are indented under the place they leave from.
pub(super) fn format_schedule(title: Option<&str>, schedule: &[ScheduledEntry<'_>]) -> String {
    let mut lines = vec![title.unwrap_or(UNTITLED).to_string()];

    if schedule.is_empty() {
        lines.extend([String::new(), "No entries".to_string()]);
    }

    let mut place_number = 0;
    for scheduled in schedule {
        lines.push(String::new());
        match scheduled.entry {
            Entry::Place(place) => {
                place_number += 1;
                let marker = if scheduled.is_fixed { " *" } else { "" };
                lines.push(format!("{place_number:>2}. {}", place.title));
                lines.push(format!(
                    "    {}{marker}  {}",
                    scheduled.start_time,
                    format_minutes(place.duration)
                ));
                lines.push(format!("    {}", place.location.name));
                lines.push(format!("    {}", place.location.maps_url()));
                if let Some(description) = &place.description {
                    lines.push(format!("    {description}"));
                }
            }
            Entry::Travel(travel) => {
                lines.push(format!(
                    "      {} {}  {}  {} → {}",
                    scheduled.start_time,
                    travel.transport.label(),
                    format_minutes(travel.duration),
                    travel.from,
                    travel.to
                ));
                if let Some(description) = &travel.description {
                    lines.push(format!("      {description}"));
                }
            }
        }
    }

    lines.join("\n") + "\n"
}

/// The list view as JSON.
#[derive(Debug, Serialize)]
pub(super) struct ScheduleOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,

    /// Identifies the itinerary this schedule was derived from.
    pub fingerprint: String,

    pub entries: Vec<ScheduledOutput<'a>>,
}

/// One scheduled entry, plus a map link for places.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ScheduledOutput<'a> {
    #[serde(flatten)]
    pub scheduled: &'a ScheduledEntry<'a>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
}

impl<'a> ScheduleOutput<'a> {
    pub fn new(
        title: Option<&'a str>,
        fingerprint: String,
        schedule: &'a [ScheduledEntry<'a>],
    ) -> Self {
        let entries = schedule
            .iter()
            .map(|scheduled| ScheduledOutput {
                scheduled,
                maps_url: match scheduled.entry {
                    Entry::Place(place) => Some(place.location.maps_url()),
                    Entry::Travel(_) => None,
                },
            })
            .collect();
        Self {
            title,
            fingerprint,
            entries,
        }
    }
}
