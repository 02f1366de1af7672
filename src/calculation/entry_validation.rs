//! Entry eligibility validation.
//!
//! An entry may only be recorded if it carries some compensable time: an
//! arrival before the business window opens, a departure after it closes, or
//! manually declared hours. The same rule applies when creating and editing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BusinessWindow;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, ClockTime, MAX_OTHER_HOURS};

/// Reason given when an entry has nothing to compensate.
pub const NO_QUALIFYING_HOURS_REASON: &str = "no qualifying compensation window or manual hours";

/// The outcome of checking an entry's eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryValidation {
    /// Whether the entry may be recorded.
    pub accepted: bool,
    /// Why the entry was rejected, when it was.
    pub reason: Option<String>,
    /// The audit step recording this check.
    pub audit_step: AuditStep,
}

impl EntryValidation {
    /// Converts a rejection into [`EngineError::ValidationRejected`].
    pub fn into_result(self) -> EngineResult<()> {
        if self.accepted {
            Ok(())
        } else {
            Err(EngineError::ValidationRejected {
                reason: self
                    .reason
                    .unwrap_or_else(|| NO_QUALIFYING_HOURS_REASON.to_string()),
            })
        }
    }
}

/// Decides whether an entry is eligible to be recorded.
///
/// # Arguments
///
/// * `arrival_time` - When the employee arrived, if recorded
/// * `departure_time` - When the employee left, if recorded
/// * `other_hours` - Manually declared hours
/// * `window` - The business window
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::MalformedInput`] if `other_hours` is negative or
/// above [`MAX_OTHER_HOURS`]. That is a shape problem, reported separately
/// from an ineligible entry.
///
/// # Examples
///
/// ```
/// use compensated_hours::calculation::{validate_entry, NO_QUALIFYING_HOURS_REASON};
/// use compensated_hours::config::BusinessWindow;
/// use compensated_hours::models::ClockTime;
/// use rust_decimal::Decimal;
///
/// let window = BusinessWindow::default();
///
/// let early = validate_entry(ClockTime::from_hm(7, 0), None, Decimal::ZERO, &window, 1).unwrap();
/// assert!(early.accepted);
///
/// let inside = validate_entry(
///     ClockTime::from_hm(8, 15),
///     ClockTime::from_hm(16, 45),
///     Decimal::ZERO,
///     &window,
///     1,
/// )
/// .unwrap();
/// assert!(!inside.accepted);
/// assert_eq!(inside.reason.as_deref(), Some(NO_QUALIFYING_HOURS_REASON));
/// ```
pub fn validate_entry(
    arrival_time: Option<ClockTime>,
    departure_time: Option<ClockTime>,
    other_hours: Decimal,
    window: &BusinessWindow,
    step_number: u32,
) -> EngineResult<EntryValidation> {
    if other_hours < Decimal::ZERO {
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

    let early_arrival = arrival_time.is_some_and(|t| t < window.start);
    let late_departure = departure_time.is_some_and(|t| t > window.end);
    let manual_hours = other_hours > Decimal::ZERO;

    let mut qualifiers = Vec::new();
    if early_arrival {
        qualifiers.push("early_arrival");
    }
    if late_departure {
        qualifiers.push("late_departure");
    }
    if manual_hours {
        qualifiers.push("other_hours");
    }

    let accepted = !qualifiers.is_empty();
    let reason = (!accepted).then(|| NO_QUALIFYING_HOURS_REASON.to_string());
    let reasoning = if accepted {
        format!("Entry qualifies through: {}", qualifiers.join(", "))
    } else {
        format!(
            "Arrival not before {}, departure not after {} and no other hours declared",
            window.start, window.end
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "entry_eligibility".to_string(),
        rule_name: "Entry Eligibility".to_string(),
        input: serde_json::json!({
            "arrival_time": arrival_time.map(|t| t.to_string()),
            "departure_time": departure_time.map(|t| t.to_string()),
            "other_hours": other_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "accepted": accepted,
            "qualifiers": qualifiers
        }),
        reasoning,
    };

    Ok(EntryValidation {
        accepted,
        reason,
        audit_step,
    })
}
