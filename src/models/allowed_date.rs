//! Calendar dates on which hours may be logged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A date an administrator has opened for logging.
///
/// Records reference these by opaque id. The engine only uses them to show
/// the calendar date next to each record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedDate {
    /// Opaque identifier referenced by time records.
    pub id: String,
    /// The calendar date.
    pub date: NaiveDate,
}

/// Finds the calendar date for `date_id` among `dates`.
pub fn lookup_date(dates: &[AllowedDate], date_id: &str) -> Option<NaiveDate> {
    dates.iter().find(|d| d.id == date_id).map(|d| d.date)
}
