//! Schedule derivation: the start time of every entry in a trip.
//!
//! A single left-to-right pass. A running clock starts at the day start and
//! is advanced by each entry's duration. A place with a fixed start time
//! resets the clock to that time, even when that moves it backward.

use std::collections::HashSet;

use jiff::Span;
use jiff::civil::{Date, DateTime};

use crate::clock::{ClockParseError, ClockTime};
use crate::model::{Entry, ScheduledEntry};

/// Calendar date the running clock lives on. Never displayed.
const REFERENCE_DATE: Date = jiff::civil::date(2024, 1, 1);

/// Errors that reject an itinerary as a whole.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("entry {id}: malformed fixed time {value:?}: {source}")]
    MalformedFixedTime {
        id: String,
        value: String,
        source: ClockParseError,
    },

    #[error("entry {id}: negative duration ({minutes} min)")]
    NegativeDuration { id: String, minutes: i64 },

    #[error("duplicate entry id: {0}")]
    DuplicateId(String),

    #[error("entry {id}: running clock overflowed")]
    ClockOverflow { id: String },
}

/// A fixed time that moved the running clock backward.
#[derive(Debug, Clone, PartialEq)]
pub struct BackwardReset<'a> {
    pub entry: &'a Entry,

    /// The fixed time, verbatim.
    pub fixed: &'a str,

    /// Where the running clock stood when the fixed time reset it.
    pub running: ClockTime,

    /// The running clock had already passed midnight.
    pub past_midnight: bool,
}

/// Derive a schedule starting the day at 8:00 AM.
///
/// # Errors
///
/// Returns a [`ScheduleError`] if the entries fail [`validate`], a fixed time
/// is malformed, or the running clock overflows.
pub fn derive_schedule(entries: &[Entry]) -> Result<Vec<ScheduledEntry<'_>>, ScheduleError> {
    derive_schedule_from(entries, ClockTime::default())
}

/// Derive a schedule with an explicit day start.
///
/// Output has one scheduled entry per input entry, in input order. Either the
/// whole schedule is produced or the call fails.
///
/// # Errors
///
/// Same as [`derive_schedule`].
pub fn derive_schedule_from(
    entries: &[Entry],
    day_start: ClockTime,
) -> Result<Vec<ScheduledEntry<'_>>, ScheduleError> {
    fold(entries, day_start, |_, _, _, _| {})
}

/// Fixed times that are earlier than the running clock they replace.
///
/// Compared on the full running clock, so a clock that has passed midnight
/// is still caught.
///
/// # Errors
///
/// Same as [`derive_schedule`].
pub fn backward_resets(
    entries: &[Entry],
    day_start: ClockTime,
) -> Result<Vec<BackwardReset<'_>>, ScheduleError> {
    let mut resets = Vec::new();
    fold(entries, day_start, |entry, fixed, running, reset| {
        if reset < running {
            resets.push(BackwardReset {
                entry,
                fixed,
                running: ClockTime::from_time(running.time()),
                past_midnight: running.date() > REFERENCE_DATE,
            });
        }
    })?;
    Ok(resets)
}

/// The pass itself. `on_reset` sees every fixed-time entry and its time,
/// with the running clock before and after the reset.
fn fold<'a>(
    entries: &'a [Entry],
    day_start: ClockTime,
    mut on_reset: impl FnMut(&'a Entry, &'a str, DateTime, DateTime),
) -> Result<Vec<ScheduledEntry<'a>>, ScheduleError> {
    validate(entries)?;

    let mut clock = REFERENCE_DATE.to_datetime(day_start.time());
    let mut schedule = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let scheduled = match entry.fixed_time() {
            Some(fixed) => {
                let time: ClockTime =
                    fixed
                        .parse()
                        .map_err(|source| ScheduleError::MalformedFixedTime {
                            id: entry.id().to_string(),
                            value: fixed.to_string(),
                            source,
                        })?;
                let reset = REFERENCE_DATE.to_datetime(time.time());
                on_reset(entry, fixed, clock, reset);
                clock = reset;
                ScheduledEntry {
                    entry,
                    start_time: fixed.to_string(),
                    is_fixed: true,
                }
            }
            None => ScheduledEntry {
                entry,
                start_time: ClockTime::from_time(clock.time()).to_string(),
                is_fixed: false,
            },
        };
        schedule.push(scheduled);

        // Nothing reads the clock after the last entry.
        if i + 1 < entries.len() {
            clock = advance(clock, entry)?;
        }
    }

    Ok(schedule)
}

/// Check the invariants the pass relies on, before any entry is processed.
///
/// Fixed times are checked during the pass, where the clock is reset.
///
/// # Errors
///
/// Returns [`ScheduleError::NegativeDuration`] or
/// [`ScheduleError::DuplicateId`] for the first offending entry.
pub fn validate(entries: &[Entry]) -> Result<(), ScheduleError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if entry.duration() < 0 {
            return Err(ScheduleError::NegativeDuration {
                id: entry.id().to_string(),
                minutes: entry.duration(),
            });
        }
        if !seen.insert(entry.id()) {
            return Err(ScheduleError::DuplicateId(entry.id().to_string()));
        }
    }
    Ok(())
}

fn advance(clock: DateTime, entry: &Entry) -> Result<DateTime, ScheduleError> {
    let overflow = || ScheduleError::ClockOverflow {
        id: entry.id().to_string(),
    };
    let span = Span::new()
        .try_minutes(entry.duration())
        .map_err(|_| overflow())?;
    clock.checked_add(span).map_err(|_| overflow())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{Location, Place, TransportMode, Travel};

    fn place(id: &str, duration: i64, start_time: Option<&str>) -> Entry {
        Entry::Place(Place {
            id: id.to_string(),
            title: format!("Place {id}"),
            location: Location {
                lat: 42.36,
                lng: -71.05,
                name: format!("Location {id}"),
            },
            duration,
            start_time: start_time.map(String::from),
            description: None,
        })
    }

    fn travel(id: &str, duration: i64) -> Entry {
        Entry::Travel(Travel {
            id: id.to_string(),
            from: "here".to_string(),
            to: "there".to_string(),
            transport: TransportMode::Walk,
            duration,
            description: None,
        })
    }

    fn times<'a>(schedule: &'a [ScheduledEntry<'_>]) -> Vec<(&'a str, bool)> {
        schedule
            .iter()
            .map(|s| (s.start_time.as_str(), s.is_fixed))
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_schedule() {
        assert!(derive_schedule(&[]).unwrap().is_empty());
    }

    #[test]
    fn accumulates_from_fixed_start() {
        let entries = [
            place("1", 30, Some("8:00 AM")),
            travel("2", 45),
            place("3", 60, None),
        ];
        let schedule = derive_schedule(&entries).unwrap();
        assert_eq!(
            times(&schedule),
            [("8:00 AM", true), ("8:30 AM", false), ("9:15 AM", false)]
        );
    }

    #[test]
    fn preserves_length_and_order() {
        let entries = [
            place("a", 10, None),
            travel("b", 5),
            place("c", 0, None),
            travel("d", 5),
            place("e", 10, Some("3:00 PM")),
        ];
        let schedule = derive_schedule(&entries).unwrap();
        assert_eq!(schedule.len(), entries.len());
        for (scheduled, entry) in schedule.iter().zip(&entries) {
            assert!(std::ptr::eq(scheduled.entry, entry));
        }
    }

    #[test]
    fn is_deterministic() {
        let entries = [
            place("1", 30, Some("8:00 AM")),
            travel("2", 45),
            place("3", 60, None),
            place("4", 15, Some("1:00 PM")),
        ];
        let first = derive_schedule(&entries).unwrap();
        let second = derive_schedule(&entries).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn fixed_time_is_verbatim_regardless_of_accumulation() {
        let entries = [place("1", 600, None), place("2", 30, Some("8:00 AM"))];
        let schedule = derive_schedule(&entries).unwrap();
        assert_eq!(schedule[1].start_time, "8:00 AM");
        assert!(schedule[1].is_fixed);
    }

    #[test]
    fn fixed_time_string_is_not_reformatted() {
        let entries = [place("1", 15, Some("08:00 AM")), travel("2", 0)];
        let schedule = derive_schedule(&entries).unwrap();
        assert_eq!(times(&schedule), [("08:00 AM", true), ("8:15 AM", false)]);
    }

    #[test]
    fn defaults_to_eight_am() {
        let entries = [travel("1", 90), place("2", 0, None)];
        let schedule = derive_schedule(&entries).unwrap();
        assert_eq!(times(&schedule), [("8:00 AM", false), ("9:30 AM", false)]);
    }

    #[test]
    fn explicit_day_start() {
        let entries = [place("1", 20, None), travel("2", 0)];
        let start = ClockTime::new(6, 50).unwrap();
        let schedule = derive_schedule_from(&entries, start).unwrap();
        assert_eq!(times(&schedule), [("6:50 AM", false), ("7:10 AM", false)]);
    }

    #[test]
    fn crosses_noon() {
        let entries = [place("1", 30, Some("11:45 AM")), travel("2", 0)];
        let schedule = derive_schedule(&entries).unwrap();
        assert_eq!(schedule[1].start_time, "12:15 PM");

        let entries = [place("1", 5, Some("12:00 PM")), travel("2", 0)];
        let schedule = derive_schedule(&entries).unwrap();
        assert_eq!(schedule[1].start_time, "12:05 PM");
    }

    #[test]
    fn crosses_midnight() {
        let entries = [place("1", 30, Some("11:45 PM")), travel("2", 0)];
        let schedule = derive_schedule(&entries).unwrap();
        assert_eq!(schedule[1].start_time, "12:15 AM");

        let entries = [place("1", 5, Some("12:00 AM")), travel("2", 0)];
        let schedule = derive_schedule(&entries).unwrap();
        assert_eq!(schedule[1].start_time, "12:05 AM");
    }

    #[test]
    fn earlier_fixed_time_resets_clock_backward() {
        let entries = [
            place("1", 240, Some("10:00 AM")),
            place("2", 30, Some("11:00 AM")),
            travel("3", 0),
        ];
        let schedule = derive_schedule(&entries).unwrap();
        assert_eq!(
            times(&schedule),
            [("10:00 AM", true), ("11:00 AM", true), ("11:30 AM", false)]
        );
    }

    #[test]
    fn zero_duration_leaves_clock_unchanged() {
        let entries = [place("1", 0, Some("9:00 AM")), place("2", 0, None)];
        let schedule = derive_schedule(&entries).unwrap();
        assert_eq!(schedule[1].start_time, "9:00 AM");
    }

    #[test]
    fn rejects_malformed_fixed_time() {
        let entries = [place("1", 30, None), place("bad", 30, Some("25:99 XM"))];
        let err = derive_schedule(&entries).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::MalformedFixedTime { ref id, ref value, .. }
                if id == "bad" && value == "25:99 XM"
        ));
    }

    #[test]
    fn rejects_negative_duration_before_processing() {
        // The malformed time comes first; the negative duration still wins.
        let entries = [place("1", 30, Some("nonsense")), travel("neg", -5)];
        let err = derive_schedule(&entries).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::NegativeDuration {
                id: "neg".to_string(),
                minutes: -5
            }
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let entries = [place("1", 30, None), travel("1", 10)];
        let err = derive_schedule(&entries).unwrap_err();
        assert_eq!(err, ScheduleError::DuplicateId("1".to_string()));
    }

    #[test]
    fn reports_overflow_instead_of_panicking() {
        let entries = [place("huge", i64::MAX, None), place("next", 0, None)];
        let err = derive_schedule(&entries).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::ClockOverflow {
                id: "huge".to_string()
            }
        );
    }

    #[test]
    fn last_entry_duration_never_overflows() {
        let entries = [place("only", 5_000_000_000, None)];
        let schedule = derive_schedule(&entries).unwrap();
        assert_eq!(times(&schedule), [("8:00 AM", false)]);
    }

    #[test]
    fn backward_resets_within_the_day() {
        let entries = [
            place("a", 90, Some("9:00 AM")),
            place("b", 30, Some("10:00 AM")),
            place("c", 0, Some("11:00 AM")),
        ];
        let resets = backward_resets(&entries, ClockTime::default()).unwrap();
        assert_eq!(resets.len(), 1);
        assert_eq!(resets[0].entry.id(), "b");
        assert_eq!(resets[0].fixed, "10:00 AM");
        assert_eq!(resets[0].running, ClockTime::new(10, 30).unwrap());
        assert!(!resets[0].past_midnight);
    }

    #[test]
    fn backward_resets_after_midnight() {
        let entries = [
            place("late", 120, Some("11:00 PM")),
            place("early", 0, Some("12:30 AM")),
        ];
        let resets = backward_resets(&entries, ClockTime::default()).unwrap();
        assert_eq!(resets.len(), 1);
        assert_eq!(resets[0].entry.id(), "early");
        assert_eq!(resets[0].running, ClockTime::new(1, 0).unwrap());
        assert!(resets[0].past_midnight);

        // A later time of day is still earlier than a clock on the next day.
        let entries = [
            place("late", 180, Some("11:00 PM")),
            place("again", 0, Some("11:30 PM")),
        ];
        let resets = backward_resets(&entries, ClockTime::default()).unwrap();
        assert_eq!(resets[0].entry.id(), "again");
    }

    #[test]
    fn forward_fixed_times_are_not_resets() {
        let entries = [place("a", 30, None), place("b", 0, Some("9:00 AM"))];
        assert!(
            backward_resets(&entries, ClockTime::default())
                .unwrap()
                .is_empty()
        );
    }
}
