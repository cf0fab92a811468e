//! Twelve-hour clock times: `"8:00 AM"`, `"12:30 PM"`.
//!
//! The only time format itineraries use. Parsing is strict: a string that
//! doesn't match `H:MM AM|PM` is an error, never a guess.

use std::fmt;
use std::str::FromStr;

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

/// Errors from parsing a twelve-hour clock string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockParseError {
    #[error("expected \"H:MM AM\" or \"H:MM PM\", got {0:?}")]
    Shape(String),

    #[error("hour {0} is outside 1-12")]
    Hour(u8),

    #[error("minute {0} is outside 00-59")]
    Minute(u8),
}

/// A time of day at minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(Time);

impl ClockTime {
    /// Builds a clock time from a 24-hour hour and a minute.
    #[must_use]
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        let hour = i8::try_from(hour).ok()?;
        let minute = i8::try_from(minute).ok()?;
        Time::new(hour, minute, 0, 0).ok().map(Self)
    }

    /// Drops anything finer than a minute.
    #[must_use]
    pub fn from_time(time: Time) -> Self {
        Self(Time::constant(time.hour(), time.minute(), 0, 0))
    }

    #[must_use]
    pub fn time(self) -> Time {
        self.0
    }

    /// Hour on the 24-hour clock, 0-23.
    #[must_use]
    pub fn hour(self) -> u8 {
        self.0.hour().unsigned_abs()
    }

    #[must_use]
    pub fn minute(self) -> u8 {
        self.0.minute().unsigned_abs()
    }
}

impl Default for ClockTime {
    /// 8:00 AM, the start of an itinerary day.
    fn default() -> Self {
        Self(Time::constant(8, 0, 0, 0))
    }
}

impl FromStr for ClockTime {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let shape = || ClockParseError::Shape(s.to_string());

        let (time, period) = s.split_once(' ').ok_or_else(shape)?;
        let pm = match period {
            "AM" => false,
            "PM" => true,
            _ => return Err(shape()),
        };

        let (hours, minutes) = time.split_once(':').ok_or_else(shape)?;
        if !(1..=2).contains(&hours.len()) || minutes.len() != 2 {
            return Err(shape());
        }
        if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(shape());
        }
        let hour: u8 = hours.parse().map_err(|_| shape())?;
        let minute: u8 = minutes.parse().map_err(|_| shape())?;

        if !(1..=12).contains(&hour) {
            return Err(ClockParseError::Hour(hour));
        }
        if minute > 59 {
            return Err(ClockParseError::Minute(minute));
        }

        // 12 AM is midnight, 12 PM is noon.
        let hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        Self::new(hour, minute).ok_or_else(shape)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, period) = match self.hour() {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        write!(f, "{hour}:{:02} {period}", self.minute())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ClockParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

/// Human-readable length of a stay or leg: `45 min`, `1h`, `2h 30min`.
#[must_use]
pub fn format_minutes(minutes: i64) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let (hours, mins) = (minutes / 60, minutes % 60);
    if mins > 0 {
        format!("{hours}h {mins}min")
    } else {
        format!("{hours}h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn parses_morning_and_evening() {
        assert_eq!((parse("8:00 AM").hour(), parse("8:00 AM").minute()), (8, 0));
        assert_eq!((parse("7:45 PM").hour(), parse("7:45 PM").minute()), (19, 45));
        assert_eq!(parse("08:05 AM").hour(), 8);
    }

    #[test]
    fn midnight_and_noon() {
        assert_eq!(parse("12:00 AM").hour(), 0);
        assert_eq!(parse("12:30 AM").hour(), 0);
        assert_eq!(parse("12:00 PM").hour(), 12);
        assert_eq!(parse("12:59 PM").hour(), 12);
    }

    #[test]
    fn formats_without_leading_zero() {
        assert_eq!(ClockTime::new(0, 0).unwrap().to_string(), "12:00 AM");
        assert_eq!(ClockTime::new(9, 5).unwrap().to_string(), "9:05 AM");
        assert_eq!(ClockTime::new(12, 0).unwrap().to_string(), "12:00 PM");
        assert_eq!(ClockTime::new(23, 59).unwrap().to_string(), "11:59 PM");
    }

    #[test]
    fn display_round_trips_through_parse() {
        for s in ["12:00 AM", "1:01 AM", "11:59 AM", "12:00 PM", "7:45 PM"] {
            assert_eq!(parse(s).to_string(), s);
        }
    }

    #[test]
    fn rejects_malformed() {
        let cases = [
            ("25:99 XM", ClockParseError::Shape("25:99 XM".to_string())),
            ("13:00 PM", ClockParseError::Hour(13)),
            ("0:30 AM", ClockParseError::Hour(0)),
            ("9:60 AM", ClockParseError::Minute(60)),
            ("9:5 AM", ClockParseError::Shape("9:5 AM".to_string())),
            ("9:05am", ClockParseError::Shape("9:05am".to_string())),
            ("9:05 am", ClockParseError::Shape("9:05 am".to_string())),
            ("9:05", ClockParseError::Shape("9:05".to_string())),
            ("+9:05 AM", ClockParseError::Shape("+9:05 AM".to_string())),
            ("", ClockParseError::Shape(String::new())),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<ClockTime>().unwrap_err(), expected, "{input}");
        }
    }

    #[test]
    fn from_time_truncates_seconds() {
        let t = ClockTime::from_time(Time::constant(14, 7, 42, 0));
        assert_eq!(t, ClockTime::new(14, 7).unwrap());
    }

    #[test]
    fn formats_minutes() {
        assert_eq!(format_minutes(0), "0 min");
        assert_eq!(format_minutes(45), "45 min");
        assert_eq!(format_minutes(60), "1h");
        assert_eq!(format_minutes(150), "2h 30min");
    }

    #[test]
    fn serde_goes_through_string() {
        let t: ClockTime = serde_json::from_str("\"9:15 AM\"").unwrap();
        assert_eq!(t, ClockTime::new(9, 15).unwrap());
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"9:15 AM\"");
        assert!(serde_json::from_str::<ClockTime>("\"9:15\"").is_err());
    }
}
