//! Audit records for engine decisions.

use serde::{Deserialize, Serialize};

/// A single recorded decision made by a calculation rule.
///
/// Each step captures the input, output, and reasoning for a rule application
/// so that any figure shown to an employee can be explained.
///
/// # Example
///
/// ```
/// use compensated_hours::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "compensated_hours".to_string(),
///     rule_name: "Compensated Hours".to_string(),
///     input: serde_json::json!({"arrival_time": "07:30"}),
///     output: serde_json::json!({"hours": "0.5"}),
///     reasoning: "Arrived 30 minutes before 08:00".to_string(),
/// };
/// assert_eq!(step.rule_id, "compensated_hours");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
