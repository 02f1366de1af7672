//! Time record model and the draft it is built from.
//!
//! A [`TimeRecord`] is one employee's attendance entry for one allowed date.
//! Callers submit an [`EntryDraft`], which is parsed and checked for shape
//! before the eligibility rules ever see it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::ClockTime;

/// Most manual hours a single entry may declare: one full day.
pub const MAX_OTHER_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// A persisted attendance entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The owning employee.
    pub employee_id: String,
    /// The allowed date this entry is for.
    pub date_id: String,
    /// Actual arrival time, if recorded.
    #[serde(default)]
    pub arrival_time: Option<ClockTime>,
    /// Actual departure time, if recorded.
    #[serde(default)]
    pub departure_time: Option<ClockTime>,
    /// Manually declared hours under "other concepts".
    #[serde(default)]
    pub other_hours: Decimal,
    /// When the record was first stored.
    pub created_at: DateTime<Utc>,
}

impl TimeRecord {
    /// Creates a new record for `employee_id` from a draft.
    pub fn new(employee_id: impl Into<String>, draft: EntryDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            date_id: draft.date_id,
            arrival_time: draft.arrival_time,
            departure_time: draft.departure_time,
            other_hours: draft.other_hours,
            created_at: Utc::now(),
        }
    }

    /// Replaces the editable fields with those of `draft`.
    ///
    /// Identity, owner and creation time are preserved.
    pub fn apply(&mut self, draft: EntryDraft) {
        self.date_id = draft.date_id;
        self.arrival_time = draft.arrival_time;
        self.departure_time = draft.departure_time;
        self.other_hours = draft.other_hours;
    }
}

/// The user-editable fields of an entry, already checked for shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// The allowed date being logged.
    pub date_id: String,
    /// Arrival time, if any.
    pub arrival_time: Option<ClockTime>,
    /// Departure time, if any.
    pub departure_time: Option<ClockTime>,
    /// Manually declared hours.
    pub other_hours: Decimal,
}

impl EntryDraft {
    /// Parses raw form input into a draft.
    ///
    /// Blank time strings count as absent and a missing `other_hours` counts
    /// as zero.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedInput`] if the date id is blank, a time
    /// is not zero-padded `HH:MM`, or `other_hours` is negative or above
    /// [`MAX_OTHER_HOURS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use compensated_hours::models::EntryDraft;
    /// use rust_decimal::Decimal;
    ///
    /// let draft = EntryDraft::parse("date_01", Some("07:30"), Some(""), None).unwrap();
    /// assert_eq!(draft.arrival_time.unwrap().to_string(), "07:30");
    /// assert_eq!(draft.departure_time, None);
    /// assert_eq!(draft.other_hours, Decimal::ZERO);
    ///
    /// assert!(EntryDraft::parse("date_01", Some("7:30"), None, None).is_err());
    /// ```
    pub fn parse(
        date_id: &str,
        arrival_time: Option<&str>,
        departure_time: Option<&str>,
        other_hours: Option<Decimal>,
    ) -> EngineResult<Self> {
        let date_id = date_id.trim();
        if date_id.is_empty() {
            return Err(EngineError::MalformedInput {
                field: "date_id".to_string(),
                message: "a date must be selected".to_string(),
            });
        }

        let other_hours = other_hours.unwrap_or(Decimal::ZERO);
        if other_hours.is_sign_negative() && !other_hours.is_zero() {
            return Err(EngineError::MalformedInput {
                field: "other_hours".to_string(),
                message: format!("must not be negative, got {}", other_hours),
            });
        }
        if other_hours > MAX_OTHER_HOURS {
            return Err(EngineError::MalformedInput {
                field: "other_hours".to_string(),
                message: format!("must not exceed {} per entry, got {}", MAX_OTHER_HOURS, other_hours),
            });
        }

        Ok(Self {
            date_id: date_id.to_string(),
            arrival_time: parse_time_field("arrival_time", arrival_time)?,
            departure_time: parse_time_field("departure_time", departure_time)?,
            other_hours,
        })
    }
}

fn parse_time_field(field: &str, raw: Option<&str>) -> EngineResult<Option<ClockTime>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<ClockTime>()
            .map(Some)
            .map_err(|e| EngineError::MalformedInput {
                field: field.to_string(),
                message: e.to_string(),
            }),
    }
}
