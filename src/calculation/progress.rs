//! Progress aggregation functionality.
//!
//! This module folds an employee's time records into a [`ProgressSummary`].
//! The summary is a pure projection: it is recomputed from the full record
//! set on every call and never cached.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::BusinessWindow;
use crate::models::{ProgressSummary, TimeRecord};

use super::compensated_hours::compensated_hours;

const ONE_HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Highest percentage shown while the target is still unmet.
const BELOW_TARGET_CEILING: Decimal = Decimal::from_parts(9999, 0, 0, false, 2);

/// Total hours a single record contributes: window hours plus other hours.
///
/// Saturates at `Decimal::MAX` instead of overflowing.
pub fn record_hours(record: &TimeRecord, window: &BusinessWindow) -> Decimal {
    compensated_hours(record.arrival_time, record.departure_time, window)
        .saturating_add(record.other_hours)
}

/// Summarizes an employee's progress toward their target.
///
/// # Arguments
///
/// * `target_hours` - The employee's target; absent or zero means no percentage
/// * `records` - Every record the employee owns, in any order
/// * `window` - The business window
///
/// # Returns
///
/// A [`ProgressSummary`] where:
/// - `compensated_total` is the sum of [`record_hours`] over `records`
/// - `pending_hours` is `target - total`, floored at zero
/// - `percent_advance` is `100 * total / target` rounded to two places; it is
///   exactly 100 once the target is reached, at most 99.99 before that, and 0
///   when there is no positive target
/// - `percent_remaining` is `100 - percent_advance`
///
/// Sums saturate rather than overflow, so stored records with extreme
/// `other_hours` still produce a summary.
///
/// # Examples
///
/// ```
/// use compensated_hours::calculation::summarize_progress;
/// use compensated_hours::config::BusinessWindow;
/// use compensated_hours::models::{EntryDraft, TimeRecord};
/// use rust_decimal::Decimal;
///
/// let records = vec![
///     TimeRecord::new("emp_001", EntryDraft::parse("d1", Some("07:30"), None, None).unwrap()),
///     TimeRecord::new(
///         "emp_001",
///         EntryDraft::parse("d2", None, Some("18:00"), Some(Decimal::new(15, 1))).unwrap(),
///     ),
/// ];
///
/// let summary = summarize_progress(Some(Decimal::new(40, 0)), &records, &BusinessWindow::default());
///
/// assert_eq!(summary.compensated_total, Decimal::new(300, 2));
/// assert_eq!(summary.pending_hours, Decimal::new(3700, 2));
/// assert_eq!(summary.percent_advance, Decimal::new(75, 1));
/// assert_eq!(summary.percent_remaining, Decimal::new(925, 1));
/// ```
pub fn summarize_progress(
    target_hours: Option<Decimal>,
    records: &[TimeRecord],
    window: &BusinessWindow,
) -> ProgressSummary {
    let compensated_total = records
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(record_hours(r, window)));

    let target = target_hours.unwrap_or(Decimal::ZERO);
    let pending_hours = target.saturating_sub(compensated_total).max(Decimal::ZERO);
    let percent_advance = percent_of_target(compensated_total, target);

    ProgressSummary {
        target_hours,
        compensated_total,
        pending_hours,
        percent_advance,
        percent_remaining: ONE_HUNDRED - percent_advance,
        record_count: records.len(),
    }
}

/// `100 * total / target`, rounded to two places.
fn percent_of_target(total: Decimal, target: Decimal) -> Decimal {
    // A missing or non-positive target leaves nothing to divide by.
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if total >= target {
        return ONE_HUNDRED;
    }

    let percent = total
        .checked_mul(ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(target))
        .or_else(|| {
            total
                .checked_div(target)
                .and_then(|r| r.checked_mul(ONE_HUNDRED))
        })
        .unwrap_or(Decimal::ZERO);

    percent
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::ZERO, BELOW_TARGET_CEILING)
}
