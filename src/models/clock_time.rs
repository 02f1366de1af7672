//! Wall-clock time of day for attendance entries.
//!
//! Arrival and departure times are stored as local wall-clock "HH:MM" strings.
//! [`ClockTime`] enforces the fixed-width, zero-padded format on the way in so
//! that all later comparisons can work on integer minutes of the day.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Errors produced when parsing a [`ClockTime`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseClockTimeError {
    /// The input did not have the `HH:MM` (or `HH:MM:00`) shape.
    #[error("expected zero-padded HH:MM, got '{input}'")]
    InvalidFormat {
        /// The rejected input.
        input: String,
    },
    /// The digits parsed but are not a time of day.
    #[error("'{input}' is not a valid time of day")]
    OutOfRange {
        /// The rejected input.
        input: String,
    },
    /// The time carries seconds; entries are recorded to the minute.
    #[error("'{input}' has non-zero seconds, expected HH:MM")]
    SubMinute {
        /// The rejected input.
        input: String,
    },
}

/// A local time of day with minute precision.
///
/// # Example
///
/// ```
/// use compensated_hours::models::ClockTime;
///
/// let arrival: ClockTime = "07:30".parse().unwrap();
/// assert_eq!(arrival.minutes_of_day(), 450);
/// assert_eq!(arrival.to_string(), "07:30");
///
/// assert!("7:30".parse::<ClockTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Builds a time from an hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Builds a time from minutes since midnight (0-1439).
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::from_hm(minutes / 60, minutes % 60)
    }

    /// Builds a time from minutes since midnight, wrapping past 23:59.
    pub fn wrapping_from_minutes(minutes: u32) -> Self {
        Self(NaiveTime::MIN + TimeDelta::minutes(i64::from(minutes % MINUTES_PER_DAY)))
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_of_day(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

}

fn two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}

impl FromStr for ClockTime {
    type Err = ParseClockTimeError;

    /// Parses `HH:MM`. A trailing `:00` is accepted, since time columns in
    /// the backing store render that way; any other seconds are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseClockTimeError::InvalidFormat {
            input: s.to_string(),
        };

        let bytes = s.as_bytes();
        if !(bytes.len() == 5 || bytes.len() == 8) || bytes[2] != b':' {
            return Err(invalid());
        }

        let hour = two_digits(&bytes[0..2]).ok_or_else(invalid)?;
        let minute = two_digits(&bytes[3..5]).ok_or_else(invalid)?;

        if bytes.len() == 8 {
            let second = (bytes[5] == b':')
                .then(|| two_digits(&bytes[6..8]))
                .flatten()
                .ok_or_else(invalid)?;
            if second > 59 {
                return Err(ParseClockTimeError::OutOfRange {
                    input: s.to_string(),
                });
            }
            if second != 0 {
                return Err(ParseClockTimeError::SubMinute {
                    input: s.to_string(),
                });
            }
        }

        Self::from_hm(hour, minute).ok_or_else(|| ParseClockTimeError::OutOfRange {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
