//! Target completion detection.
//!
//! When an employee's compensated total first reaches their target, the
//! presentation layer shows a one-time celebration. Nothing about this is
//! stored: the signal is derived by comparing the summary before a change
//! with the summary after it, so it re-arms by itself once the total drops
//! back below the target.

use crate::models::ProgressSummary;

/// Returns true when `after` reaches the target and `before` did not.
///
/// # Examples
///
/// ```
/// use compensated_hours::calculation::{detect_target_crossing, summarize_progress};
/// use compensated_hours::config::BusinessWindow;
/// use compensated_hours::models::{EntryDraft, TimeRecord};
/// use rust_decimal::Decimal;
///
/// let window = BusinessWindow::default();
/// let target = Some(Decimal::new(4, 0));
/// let mut records = vec![TimeRecord::new(
///     "emp_001",
///     EntryDraft::parse("d1", None, None, Some(Decimal::new(3, 0))).unwrap(),
/// )];
///
/// let before = summarize_progress(target, &records, &window);
/// records.push(TimeRecord::new(
///     "emp_001",
///     EntryDraft::parse("d2", Some("07:00"), None, None).unwrap(),
/// ));
/// let after = summarize_progress(target, &records, &window);
///
/// assert!(detect_target_crossing(&before, &after));
/// assert!(!detect_target_crossing(&after, &after));
/// ```
pub fn detect_target_crossing(before: &ProgressSummary, after: &ProgressSummary) -> bool {
    !before.target_reached() && after.target_reached()
}
