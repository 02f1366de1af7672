//! Organization-wide progress aggregation.
//!
//! Administrators can see every employee's progress. Access is expressed as an
//! [`AdminCapability`] value that can only be obtained from an administrator
//! [`Identity`], so the aggregation itself never inspects account names.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use tracing::warn;

use crate::config::BusinessWindow;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeProfile, EmployeeProgress, FleetReport, Identity, TimeRecord};

use super::progress::summarize_progress;

/// Proof that the caller holds the administrator role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminCapability {
    _private: (),
}

impl AdminCapability {
    /// Grants the capability to administrators.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Forbidden`] for any other role.
    ///
    /// # Examples
    ///
    /// ```
    /// use compensated_hours::calculation::AdminCapability;
    /// use compensated_hours::models::Identity;
    ///
    /// assert!(AdminCapability::from_identity(&Identity::administrator("boss")).is_ok());
    /// assert!(AdminCapability::from_identity(&Identity::employee("emp_001")).is_err());
    /// ```
    pub fn from_identity(identity: &Identity) -> EngineResult<Self> {
        if identity.is_administrator() {
            Ok(Self { _private: () })
        } else {
            Err(EngineError::Forbidden {
                message: format!(
                    "employee '{}' may not view other employees' progress",
                    identity.employee_id
                ),
            })
        }
    }
}

/// Pairs each profile with the records it owns.
///
/// Profiles without records get an empty list. Records whose owner has no
/// profile are dropped with a warning.
pub fn group_records_by_employee(
    profiles: Vec<EmployeeProfile>,
    records: Vec<TimeRecord>,
) -> Vec<(EmployeeProfile, Vec<TimeRecord>)> {
    let mut by_owner: HashMap<String, Vec<TimeRecord>> = HashMap::new();
    for record in records {
        by_owner
            .entry(record.employee_id.clone())
            .or_default()
            .push(record);
    }

    let grouped: Vec<(EmployeeProfile, Vec<TimeRecord>)> = profiles
        .into_iter()
        .map(|profile| {
            let owned = by_owner.remove(&profile.id).unwrap_or_default();
            (profile, owned)
        })
        .collect();

    for (employee_id, orphaned) in by_owner {
        warn!(
            employee_id = %employee_id,
            records = orphaned.len(),
            "Skipping records with no matching employee profile"
        );
    }

    grouped
}

/// Summarizes every employee independently.
///
/// # Arguments
///
/// * `capability` - Proof of administrator access
/// * `employees` - Each profile with all of its records
/// * `window` - The business window
///
/// # Examples
///
/// ```
/// use compensated_hours::calculation::{summarize_fleet, AdminCapability};
/// use compensated_hours::config::BusinessWindow;
/// use compensated_hours::models::{EmployeeProfile, Identity};
/// use rust_decimal::Decimal;
///
/// let capability = AdminCapability::from_identity(&Identity::administrator("boss")).unwrap();
/// let profile = EmployeeProfile {
///     id: "emp_001".to_string(),
///     display_name: "Ana".to_string(),
///     email: None,
///     target_hours: Some(Decimal::new(40, 0)),
/// };
///
/// let report = summarize_fleet(&capability, &[(profile, vec![])], &BusinessWindow::default());
/// assert_eq!(report.summary_for("emp_001").unwrap().pending_hours, Decimal::new(40, 0));
/// ```
pub fn summarize_fleet(
    _capability: &AdminCapability,
    employees: &[(EmployeeProfile, Vec<TimeRecord>)],
    window: &BusinessWindow,
) -> FleetReport {
    let employees: BTreeMap<String, EmployeeProgress> = employees
        .iter()
        .map(|(profile, records)| {
            let summary = summarize_progress(profile.target_hours, records, window);
            (
                profile.id.clone(),
                EmployeeProgress {
                    employee_id: profile.id.clone(),
                    display_name: profile.display_name.clone(),
                    summary,
                },
            )
        })
        .collect();

    FleetReport {
        generated_at: Utc::now(),
        employees,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryDraft;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn profile(id: &str, target: &str) -> EmployeeProfile {
        EmployeeProfile {
            id: id.to_string(),
            display_name: format!("Employee {}", id),
            email: None,
            target_hours: Some(dec(target)),
        }
    }

    fn record(owner: &str, other: &str) -> TimeRecord {
        TimeRecord::new(
            owner,
            EntryDraft::parse("d1", None, None, Some(dec(other))).unwrap(),
        )
    }

    fn admin() -> AdminCapability {
        AdminCapability::from_identity(&Identity::administrator("boss")).unwrap()
    }

    #[test]
    fn test_employee_cannot_obtain_capability() {
        match AdminCapability::from_identity(&Identity::employee("emp_001")) {
            Err(EngineError::Forbidden { message }) => assert!(message.contains("emp_001")),
            other => panic!("Expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn test_each_employee_summarized_independently() {
        let grouped = group_records_by_employee(
            vec![profile("a", "40"), profile("b", "32")],
            vec![record("a", "4"), record("b", "16"), record("a", "6")],
        );

        let report = summarize_fleet(&admin(), &grouped, &BusinessWindow::default());

        let a = report.summary_for("a").unwrap();
        assert_eq!(a.compensated_total, dec("10"));
        assert_eq!(a.percent_advance, dec("25"));
        assert_eq!(a.record_count, 2);

        let b = report.summary_for("b").unwrap();
        assert_eq!(b.compensated_total, dec("16"));
        assert_eq!(b.percent_advance, dec("50"));
    }

    #[test]
    fn test_employee_without_records_gets_zero_summary() {
        let grouped = group_records_by_employee(vec![profile("idle", "40")], vec![]);
        let report = summarize_fleet(&admin(), &grouped, &BusinessWindow::default());

        let idle = report.summary_for("idle").unwrap();
        assert_eq!(idle.compensated_total, Decimal::ZERO);
        assert_eq!(idle.pending_hours, dec("40"));
        assert_eq!(idle.record_count, 0);
    }

    #[test]
    fn test_orphaned_records_are_skipped() {
        let grouped = group_records_by_employee(
            vec![profile("a", "40")],
            vec![record("a", "1"), record("ghost", "99")],
        );

        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].1.len(), 1);

        let report = summarize_fleet(&admin(), &grouped, &BusinessWindow::default());
        assert!(report.summary_for("ghost").is_none());
    }

    #[test]
    fn test_report_carries_display_names_in_id_order() {
        let grouped = group_records_by_employee(vec![profile("z", "1"), profile("m", "1")], vec![]);
        let report = summarize_fleet(&admin(), &grouped, &BusinessWindow::default());

        let ids: Vec<&String> = report.employees.keys().collect();
        assert_eq!(ids, vec!["m", "z"]);
        assert_eq!(report.employees["m"].display_name, "Employee m");
    }
}
