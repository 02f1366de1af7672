//! Per-record breakdown for an employee's own records view.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::BusinessWindow;
use crate::models::{AllowedDate, ClockTime, TimeRecord, lookup_date};

use super::compensated_hours::compensated_hours;

/// One record as shown to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// The record this line describes.
    pub record_id: Uuid,
    /// The allowed date id the record references.
    pub date_id: String,
    /// The calendar date, if the id is still among the allowed dates.
    pub date: Option<NaiveDate>,
    /// Arrival time, if recorded.
    pub arrival_time: Option<ClockTime>,
    /// Departure time, if recorded.
    pub departure_time: Option<ClockTime>,
    /// Manually declared hours.
    pub other_hours: Decimal,
    /// Hours outside the business window.
    pub window_hours: Decimal,
    /// `window_hours + other_hours`.
    pub day_total: Decimal,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Builds ledger lines for `records`, newest first.
///
/// Dates are looked up in `dates` for display only; an unknown date id leaves
/// `date` empty and does not affect the figures.
pub fn build_ledger(
    records: &[TimeRecord],
    dates: &[AllowedDate],
    window: &BusinessWindow,
) -> Vec<LedgerLine> {
    let mut lines: Vec<LedgerLine> = records
        .iter()
        .map(|record| {
            let window_hours =
                compensated_hours(record.arrival_time, record.departure_time, window);
            LedgerLine {
                record_id: record.id,
                date_id: record.date_id.clone(),
                date: lookup_date(dates, &record.date_id),
                arrival_time: record.arrival_time,
                departure_time: record.departure_time,
                other_hours: record.other_hours,
                window_hours,
                day_total: window_hours.saturating_add(record.other_hours),
                created_at: record.created_at,
            }
        })
        .collect();

    lines.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryDraft;
    use chrono::TimeDelta;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn dates() -> Vec<AllowedDate> {
        vec![AllowedDate {
            id: "d1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        }]
    }

    fn record(date_id: &str, departure: Option<&str>, other: &str) -> TimeRecord {
        TimeRecord::new(
            "emp_001",
            EntryDraft::parse(date_id, None, departure, Some(dec(other))).unwrap(),
        )
    }

    #[test]
    fn test_line_totals() {
        let lines = build_ledger(
            &[record("d1", Some("18:00"), "1.5")],
            &dates(),
            &BusinessWindow::default(),
        );

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(lines[0].window_hours, dec("1.00"));
        assert_eq!(lines[0].day_total, dec("2.50"));
    }

    #[test]
    fn test_unknown_date_id_still_listed() {
        let lines = build_ledger(
            &[record("gone", None, "2")],
            &dates(),
            &BusinessWindow::default(),
        );

        assert_eq!(lines[0].date, None);
        assert_eq!(lines[0].date_id, "gone");
        assert_eq!(lines[0].day_total, dec("2"));
    }

    #[test]
    fn test_newest_first() {
        let mut older = record("d1", None, "1");
        older.created_at -= TimeDelta::hours(2);
        let newer = record("d1", None, "2");

        let lines = build_ledger(
            &[older.clone(), newer.clone()],
            &dates(),
            &BusinessWindow::default(),
        );

        assert_eq!(lines[0].record_id, newer.id);
        assert_eq!(lines[1].record_id, older.id);
    }
}
