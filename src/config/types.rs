//! Configuration types for the compensated hours engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

use crate::models::{ClockTime, Identity, Role};

/// Default start of the business window, in minutes past midnight (08:00).
pub const DEFAULT_WINDOW_START_MINUTES: u32 = 8 * 60;

/// Default end of the business window, in minutes past midnight (17:00).
pub const DEFAULT_WINDOW_END_MINUTES: u32 = 17 * 60;

/// The regular working window. Time outside it is compensable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessWindow {
    /// Arrivals strictly before this time are compensated.
    pub start: ClockTime,
    /// Departures strictly after this time are compensated.
    pub end: ClockTime,
}

impl BusinessWindow {
    /// Minutes past midnight at which the window opens.
    pub fn start_minutes(&self) -> u32 {
        self.start.minutes_of_day()
    }

    /// Minutes past midnight at which the window closes.
    pub fn end_minutes(&self) -> u32 {
        self.end.minutes_of_day()
    }
}

impl Default for BusinessWindow {
    fn default() -> Self {
        Self {
            start: ClockTime::wrapping_from_minutes(DEFAULT_WINDOW_START_MINUTES),
            end: ClockTime::wrapping_from_minutes(DEFAULT_WINDOW_END_MINUTES),
        }
    }
}

/// What to do when an employee logs a second record for the same date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateDatePolicy {
    /// Several records per employee and date are accepted.
    #[default]
    Allow,
    /// At most one record per employee and date.
    Reject,
}

/// Entry policy section of `engine.yaml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PolicyConfig {
    /// Handling of repeated dates.
    #[serde(default)]
    pub duplicate_dates: DuplicateDatePolicy,
}

/// Structure of `engine.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineFileConfig {
    /// The business window.
    #[serde(default)]
    pub window: BusinessWindow,
    /// Entry policy.
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Structure of `access.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// Emails of accounts granted the administrator role.
    #[serde(default)]
    pub administrators: Vec<String>,
}

impl AccessConfig {
    /// Resolves the role of a signed-in account.
    ///
    /// Emails are compared case-insensitively. An account without an email
    /// is always a regular employee.
    pub fn resolve_identity(&self, employee_id: &str, email: Option<&str>) -> Identity {
        let is_admin = email.is_some_and(|email| {
            self.administrators
                .iter()
                .any(|admin| admin.trim().eq_ignore_ascii_case(email.trim()))
        });

        Identity {
            employee_id: employee_id.to_string(),
            role: if is_admin {
                Role::Administrator
            } else {
                Role::Employee
            },
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    window: BusinessWindow,
    policy: PolicyConfig,
    access: AccessConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(window: BusinessWindow, policy: PolicyConfig, access: AccessConfig) -> Self {
        Self {
            window,
            policy,
            access,
        }
    }

    /// Returns the business window.
    pub fn window(&self) -> &BusinessWindow {
        &self.window
    }

    /// Returns the entry policy.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Returns the access configuration.
    pub fn access(&self) -> &AccessConfig {
        &self.access
    }

    /// Returns a copy with a different duplicate-date policy.
    pub fn with_duplicate_dates(mut self, policy: DuplicateDatePolicy) -> Self {
        self.policy.duplicate_dates = policy;
        self
    }

    /// Returns a copy with the given administrator emails.
    pub fn with_administrators<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.access.administrators = emails.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_eight_to_five() {
        let window = BusinessWindow::default();
        assert_eq!(window.start.to_string(), "08:00");
        assert_eq!(window.end.to_string(), "17:00");
        assert_eq!(window.start_minutes(), 480);
        assert_eq!(window.end_minutes(), 1020);
    }

    #[test]
    fn test_engine_file_defaults() {
        let config: EngineFileConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.window, BusinessWindow::default());
        assert_eq!(config.policy.duplicate_dates, DuplicateDatePolicy::Allow);
    }

    #[test]
    fn test_engine_file_parses_custom_window() {
        let yaml = "window:\n  start: \"07:30\"\n  end: \"16:30\"\npolicy:\n  duplicate_dates: reject\n";
        let config: EngineFileConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.window.start_minutes(), 450);
        assert_eq!(config.window.end_minutes(), 990);
        assert_eq!(config.policy.duplicate_dates, DuplicateDatePolicy::Reject);
    }

    #[test]
    fn test_resolve_identity_administrator() {
        let access = AccessConfig {
            administrators: vec!["Boss@Example.com".to_string()],
        };
        let identity = access.resolve_identity("u1", Some("boss@example.com"));
        assert_eq!(identity.role, Role::Administrator);
        assert_eq!(identity.employee_id, "u1");
    }

    #[test]
    fn test_resolve_identity_regular_employee() {
        let access = AccessConfig {
            administrators: vec!["boss@example.com".to_string()],
        };
        assert_eq!(
            access.resolve_identity("u2", Some("ana@example.com")).role,
            Role::Employee
        );
        assert_eq!(access.resolve_identity("u3", None).role, Role::Employee);
    }

    #[test]
    fn test_builder_helpers() {
        let config = EngineConfig::default()
            .with_duplicate_dates(DuplicateDatePolicy::Reject)
            .with_administrators(["admin@example.com"]);
        assert_eq!(config.policy().duplicate_dates, DuplicateDatePolicy::Reject);
        assert_eq!(config.access().administrators, vec!["admin@example.com"]);
    }
}
