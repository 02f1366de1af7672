//! Progress summary models.
//!
//! This module contains the [`ProgressSummary`] derived for a single employee
//! and the [`FleetReport`] assembled for administrators. Neither is ever
//! stored; both are projections of the current set of time records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An employee's advancement toward their compensation target.
///
/// # Example
///
/// ```
/// use compensated_hours::models::ProgressSummary;
/// use rust_decimal::Decimal;
///
/// let summary = ProgressSummary {
///     target_hours: Some(Decimal::new(40, 0)),
///     compensated_total: Decimal::new(300, 2),
///     pending_hours: Decimal::new(3700, 2),
///     percent_advance: Decimal::new(75, 1),
///     percent_remaining: Decimal::new(925, 1),
///     record_count: 2,
/// };
/// assert!(!summary.target_reached());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// The target the summary was computed against.
    pub target_hours: Option<Decimal>,
    /// Hours compensated so far.
    pub compensated_total: Decimal,
    /// Hours still to compensate, never negative.
    pub pending_hours: Decimal,
    /// Percentage of the target reached, within 0..=100.
    pub percent_advance: Decimal,
    /// `100 - percent_advance`.
    pub percent_remaining: Decimal,
    /// Number of records folded into the summary.
    pub record_count: usize,
}

impl ProgressSummary {
    /// Returns true once some hours are compensated and they meet the target.
    ///
    /// An absent target counts as zero.
    pub fn target_reached(&self) -> bool {
        let target = self.target_hours.unwrap_or(Decimal::ZERO);
        self.compensated_total > Decimal::ZERO && self.compensated_total >= target
    }
}

/// One row of the administrative report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProgress {
    /// The employee the row describes.
    pub employee_id: String,
    /// The employee's display name.
    pub display_name: String,
    /// The employee's progress.
    pub summary: ProgressSummary,
}

/// Progress for every employee, keyed by employee id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetReport {
    /// When the report was computed.
    pub generated_at: DateTime<Utc>,
    /// One entry per employee profile.
    pub employees: BTreeMap<String, EmployeeProgress>,
}

impl FleetReport {
    /// Returns the summary for `employee_id`, if present.
    pub fn summary_for(&self, employee_id: &str) -> Option<&ProgressSummary> {
        self.employees.get(employee_id).map(|e| &e.summary)
    }
}
