//! Compensated hours calculation functionality.
//!
//! This module converts a single attendance entry into compensated hours:
//! the time before the business window opens plus the time after it closes.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::BusinessWindow;
use crate::models::{AuditStep, ClockTime};

/// Decimal places kept on a per-entry compensated hours figure.
pub const HOURS_DECIMAL_PLACES: u32 = 2;

/// The result of calculating compensated hours for one entry.
///
/// Contains the minutes found on each side of the business window, the
/// rounded total in hours, and the audit step documenting the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensatedHoursResult {
    /// Minutes between arrival and the window start (0 if not early).
    pub early_minutes: u32,
    /// Minutes between the window end and departure (0 if not late).
    pub late_minutes: u32,
    /// Total compensated hours, rounded to two decimal places.
    pub hours: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Minutes worked outside the window on each side, as `(early, late)`.
///
/// An absent time contributes nothing, as does an arrival at or after the
/// window start or a departure at or before the window end.
pub fn window_overflow_minutes(
    arrival_time: Option<ClockTime>,
    departure_time: Option<ClockTime>,
    window: &BusinessWindow,
) -> (u32, u32) {
    let early = arrival_time
        .map(|t| window.start_minutes().saturating_sub(t.minutes_of_day()))
        .unwrap_or(0);
    let late = departure_time
        .map(|t| t.minutes_of_day().saturating_sub(window.end_minutes()))
        .unwrap_or(0);
    (early, late)
}

/// Converts minutes to hours rounded to [`HOURS_DECIMAL_PLACES`], midpoint away from zero.
pub fn minutes_to_hours(minutes: u32) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60u32))
        .round_dp_with_strategy(HOURS_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Compensated hours for an entry, without building an audit step.
///
/// # Examples
///
/// ```
/// use compensated_hours::calculation::compensated_hours;
/// use compensated_hours::config::BusinessWindow;
/// use compensated_hours::models::ClockTime;
/// use rust_decimal::Decimal;
///
/// let window = BusinessWindow::default();
/// let arrival = ClockTime::from_hm(7, 30);
/// let departure = ClockTime::from_hm(18, 0);
///
/// assert_eq!(compensated_hours(arrival, departure, &window), Decimal::new(150, 2));
/// assert_eq!(compensated_hours(None, None, &window), Decimal::ZERO);
/// ```
pub fn compensated_hours(
    arrival_time: Option<ClockTime>,
    departure_time: Option<ClockTime>,
    window: &BusinessWindow,
) -> Decimal {
    let (early, late) = window_overflow_minutes(arrival_time, departure_time, window);
    minutes_to_hours(early + late)
}

/// Calculates compensated hours for an entry and documents the result.
///
/// # Arguments
///
/// * `arrival_time` - When the employee arrived, if recorded
/// * `departure_time` - When the employee left, if recorded
/// * `window` - The business window outside which time is compensated
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use compensated_hours::calculation::calculate_compensated_hours;
/// use compensated_hours::config::BusinessWindow;
/// use compensated_hours::models::ClockTime;
/// use rust_decimal::Decimal;
///
/// let window = BusinessWindow::default();
/// let result = calculate_compensated_hours(ClockTime::from_hm(6, 40), None, &window, 1);
///
/// assert_eq!(result.early_minutes, 80);
/// assert_eq!(result.late_minutes, 0);
/// assert_eq!(result.hours, Decimal::new(133, 2));
/// ```
pub fn calculate_compensated_hours(
    arrival_time: Option<ClockTime>,
    departure_time: Option<ClockTime>,
    window: &BusinessWindow,
    step_number: u32,
) -> CompensatedHoursResult {
    let (early_minutes, late_minutes) =
        window_overflow_minutes(arrival_time, departure_time, window);
    let hours = minutes_to_hours(early_minutes + late_minutes);

    let mut parts = Vec::new();
    if early_minutes > 0 {
        parts.push(format!(
            "arrived {} minutes before {}",
            early_minutes, window.start
        ));
    }
    if late_minutes > 0 {
        parts.push(format!("left {} minutes after {}", late_minutes, window.end));
    }
    let reasoning = if parts.is_empty() {
        format!("No time outside the {}-{} window", window.start, window.end)
    } else {
        format!("{}; {} hours compensated", parts.join(" and "), hours.normalize())
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "compensated_hours".to_string(),
        rule_name: "Compensated Hours".to_string(),
        input: serde_json::json!({
            "arrival_time": arrival_time.map(|t| t.to_string()),
            "departure_time": departure_time.map(|t| t.to_string()),
            "window_start": window.start.to_string(),
            "window_end": window.end.to_string()
        }),
        output: serde_json::json!({
            "early_minutes": early_minutes,
            "late_minutes": late_minutes,
            "hours": hours.normalize().to_string()
        }),
        reasoning,
    };

    CompensatedHoursResult {
        early_minutes,
        late_minutes,
        hours,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn t(s: &str) -> Option<ClockTime> {
        Some(ClockTime::from_str(s).unwrap())
    }

    fn window() -> BusinessWindow {
        BusinessWindow::default()
    }

    #[test]
    fn test_early_arrival_half_hour() {
        assert_eq!(compensated_hours(t("07:30"), None, &window()), dec("0.50"));
    }

    #[test]
    fn test_late_departure_one_hour() {
        assert_eq!(compensated_hours(None, t("18:00"), &window()), dec("1.00"));
    }

    #[test]
    fn test_both_sides_add_up() {
        assert_eq!(
            compensated_hours(t("06:00"), t("19:30"), &window()),
            dec("4.50")
        );
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        assert_eq!(
            compensated_hours(t("08:00"), t("17:00"), &window()),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_inside_window_contributes_nothing() {
        assert_eq!(
            compensated_hours(t("08:15"), t("16:45"), &window()),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_late_arrival_does_not_go_negative() {
        assert_eq!(compensated_hours(t("10:00"), None, &window()), Decimal::ZERO);
    }

    #[test]
    fn test_one_minute_rounds_to_two_places() {
        // 1/60 = 0.01666...
        assert_eq!(compensated_hours(t("07:59"), None, &window()), dec("0.02"));
    }

    #[test]
    fn test_rounding_applies_to_total_not_sides() {
        // 7 + 7 minutes = 14/60 = 0.2333..., not 0.12 + 0.12
        assert_eq!(
            compensated_hours(t("07:53"), t("17:07"), &window()),
            dec("0.23")
        );
    }

    #[test]
    fn test_custom_window() {
        let window = BusinessWindow {
            start: ClockTime::from_hm(9, 0).unwrap(),
            end: ClockTime::from_hm(18, 0).unwrap(),
        };
        assert_eq!(compensated_hours(t("08:00"), t("18:30"), &window), dec("1.50"));
    }

    #[test]
    fn test_audit_step_for_compensated_entry() {
        let result = calculate_compensated_hours(t("07:30"), t("18:00"), &window(), 3);

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "compensated_hours");
        assert_eq!(result.audit_step.input["arrival_time"], "07:30");
        assert_eq!(result.audit_step.input["window_start"], "08:00");
        assert_eq!(result.audit_step.output["early_minutes"], 30);
        assert_eq!(result.audit_step.output["late_minutes"], 60);
        assert_eq!(result.audit_step.output["hours"], "1.5");
        assert!(result.audit_step.reasoning.contains("arrived 30 minutes before 08:00"));
        assert!(result.audit_step.reasoning.contains("left 60 minutes after 17:00"));
    }

    #[test]
    fn test_audit_step_for_uncompensated_entry() {
        let result = calculate_compensated_hours(None, None, &window(), 1);

        assert_eq!(result.hours, Decimal::ZERO);
        assert!(result.audit_step.input["arrival_time"].is_null());
        assert!(result.audit_step.reasoning.contains("No time outside"));
    }

    proptest! {
        #[test]
        fn prop_arrival_contribution(minute in 0u32..1440) {
            let arrival = ClockTime::from_minutes(minute);
            let hours = compensated_hours(arrival, None, &window());
            if minute < 480 {
                prop_assert_eq!(hours, minutes_to_hours(480 - minute));
            } else {
                prop_assert_eq!(hours, Decimal::ZERO);
            }
        }

        #[test]
        fn prop_departure_contribution(minute in 0u32..1440) {
            let departure = ClockTime::from_minutes(minute);
            let hours = compensated_hours(None, departure, &window());
            if minute > 1020 {
                prop_assert_eq!(hours, minutes_to_hours(minute - 1020));
            } else {
                prop_assert_eq!(hours, Decimal::ZERO);
            }
        }

        #[test]
        fn prop_calculation_is_idempotent(a in 0u32..1440, d in 0u32..1440) {
            let arrival = ClockTime::from_minutes(a);
            let departure = ClockTime::from_minutes(d);
            let first = calculate_compensated_hours(arrival, departure, &window(), 1);
            let second = calculate_compensated_hours(arrival, departure, &window(), 1);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.hours >= Decimal::ZERO);
            prop_assert_eq!(first.hours, compensated_hours(arrival, departure, &window()));
        }
    }
}
