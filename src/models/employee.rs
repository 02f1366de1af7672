//! Employee profile and identity types.
//!
//! This module defines the [`EmployeeProfile`] that carries an employee's
//! compensation target, and the [`Identity`] the session layer hands to the
//! engine for each request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The access level of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular employee; sees only their own records.
    Employee,
    /// May read every employee's progress and edit any profile.
    Administrator,
}

/// The authenticated caller of an engine operation.
///
/// # Examples
///
/// ```
/// use compensated_hours::models::{Identity, Role};
///
/// let caller = Identity::employee("emp_001");
/// assert_eq!(caller.role, Role::Employee);
/// assert!(!caller.is_administrator());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The employee id of the caller.
    pub employee_id: String,
    /// The caller's access level.
    pub role: Role,
}

impl Identity {
    /// An identity with the [`Role::Employee`] role.
    pub fn employee(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            role: Role::Employee,
        }
    }

    /// An identity with the [`Role::Administrator`] role.
    pub fn administrator(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            role: Role::Administrator,
        }
    }

    /// Returns true if the caller holds the administrator role.
    pub fn is_administrator(&self) -> bool {
        self.role == Role::Administrator
    }

    /// Returns true if the caller is `employee_id` or an administrator.
    pub fn may_act_for(&self, employee_id: &str) -> bool {
        self.employee_id == employee_id || self.is_administrator()
    }
}

/// An employee and their compensation goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier, shared with the identity provider.
    pub id: String,
    /// Name shown in greetings and reports.
    pub display_name: String,
    /// Login email, when known.
    #[serde(default)]
    pub email: Option<String>,
    /// Hours the employee needs to compensate (e.g. 32 or 40).
    #[serde(default)]
    pub target_hours: Option<Decimal>,
}

/// Changes to an existing profile. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileChanges {
    /// New display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// New compensation target.
    #[serde(default)]
    pub target_hours: Option<Decimal>,
}

impl EmployeeProfile {
    /// Applies `changes`, leaving absent fields untouched.
    pub fn apply(&mut self, changes: ProfileChanges) {
        if let Some(display_name) = changes.display_name {
            self.display_name = display_name;
        }
        if let Some(target_hours) = changes.target_hours {
            self.target_hours = Some(target_hours);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile() -> EmployeeProfile {
        EmployeeProfile {
            id: "emp_001".to_string(),
            display_name: "Ana".to_string(),
            email: Some("ana@example.com".to_string()),
            target_hours: Some(Decimal::new(40, 0)),
        }
    }

    #[test]
    fn test_deserialize_profile_without_target() {
        let json = r#"{
            "id": "emp_002",
            "display_name": "Luis"
        }"#;

        let profile: EmployeeProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, "emp_002");
        assert_eq!(profile.email, None);
        assert_eq!(profile.target_hours, None);
    }

    #[test]
    fn test_deserialize_profile_with_string_target() {
        let json = r#"{
            "id": "emp_003",
            "display_name": "Marta",
            "target_hours": "32"
        }"#;

        let profile: EmployeeProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.target_hours, Some(Decimal::new(32, 0)));
    }

    #[test]
    fn test_apply_changes_keeps_absent_fields() {
        let mut profile = create_test_profile();
        profile.apply(ProfileChanges {
            display_name: None,
            target_hours: Some(Decimal::new(32, 0)),
        });

        assert_eq!(profile.display_name, "Ana");
        assert_eq!(profile.target_hours, Some(Decimal::new(32, 0)));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(
            serde_json::to_string(&Role::Administrator).unwrap(),
            "\"administrator\""
        );
        assert_eq!(serde_json::to_string(&Role::Employee).unwrap(), "\"employee\"");
    }

    #[test]
    fn test_may_act_for_self() {
        let caller = Identity::employee("emp_001");
        assert!(caller.may_act_for("emp_001"));
        assert!(!caller.may_act_for("emp_002"));
    }

    #[test]
    fn test_administrator_may_act_for_anyone() {
        let caller = Identity::administrator("admin_001");
        assert!(caller.is_administrator());
        assert!(caller.may_act_for("emp_002"));
    }
}
