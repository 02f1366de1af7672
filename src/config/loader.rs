//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AllowedDate, Identity};

use super::types::{
    AccessConfig, BusinessWindow, DuplicateDatePolicy, EngineConfig, EngineFileConfig,
};

#[derive(Debug, Deserialize)]
struct DatesFile {
    #[serde(default)]
    dates: Vec<AllowedDate>,
}

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── engine.yaml   # Business window and entry policy
/// ├── access.yaml   # Administrator accounts
/// └── dates.yaml    # Optional seed list of allowed dates
/// ```
///
/// # Example
///
/// ```no_run
/// use compensated_hours::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Window opens at {}", loader.window().start);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The business window does not open before it closes
    ///
    /// # Example
    ///
    /// ```no_run
    /// use compensated_hours::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), compensated_hours::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine = Self::load_yaml::<EngineFileConfig>(&path.join("engine.yaml"))?;
        let access = Self::load_yaml::<AccessConfig>(&path.join("access.yaml"))?;

        Self::check_window(&engine.window)?;

        debug!(
            path = %path.display(),
            window_start = %engine.window.start,
            window_end = %engine.window.end,
            administrators = access.administrators.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(engine.window, engine.policy, access),
        })
    }

    /// Reads the allowed dates listed in `dates.yaml`, if the file exists.
    ///
    /// A missing file yields an empty list; a malformed one is an error.
    pub fn load_allowed_dates<P: AsRef<Path>>(path: P) -> EngineResult<Vec<AllowedDate>> {
        let file = path.as_ref().join("dates.yaml");
        if !file.exists() {
            return Ok(Vec::new());
        }
        let dates = Self::load_yaml::<DatesFile>(&file)?.dates;
        debug!(path = %file.display(), count = dates.len(), "Loaded allowed dates");
        Ok(dates)
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        Self::check_window(config.window())?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_window(window: &BusinessWindow) -> EngineResult<()> {
        if window.start >= window.end {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "business window must open before it closes, got {} to {}",
                    window.start, window.end
                ),
            });
        }
        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the business window.
    pub fn window(&self) -> &BusinessWindow {
        self.config.window()
    }

    /// Returns the duplicate-date policy.
    pub fn duplicate_dates(&self) -> DuplicateDatePolicy {
        self.config.policy().duplicate_dates
    }

    /// Resolves a signed-in account to an engine identity.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use compensated_hours::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let identity = loader.resolve_identity("user-123", Some("admin@example.com"));
    /// println!("Administrator: {}", identity.is_administrator());
    /// # Ok::<(), compensated_hours::error::EngineError>(())
    /// ```
    pub fn resolve_identity(&self, employee_id: &str, email: Option<&str>) -> Identity {
        self.config.access().resolve_identity(employee_id, email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClockTime, Role};

    fn config_path() -> &'static str {
        "./config/default"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.window().start.to_string(), "08:00");
        assert_eq!(loader.window().end.to_string(), "17:00");
        assert_eq!(loader.duplicate_dates(), DuplicateDatePolicy::Allow);
    }

    #[test]
    fn test_loaded_administrator_resolves() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let identity = loader.resolve_identity("u1", Some("admin@example.com"));
        assert_eq!(identity.role, Role::Administrator);

        let identity = loader.resolve_identity("u2", Some("ana@example.com"));
        assert_eq!(identity.role, Role::Employee);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let window = BusinessWindow {
            start: ClockTime::from_hm(17, 0).unwrap(),
            end: ClockTime::from_hm(8, 0).unwrap(),
        };
        let config = EngineConfig::new(window, Default::default(), Default::default());

        match ConfigLoader::from_config(config) {
            Err(EngineError::InvalidConfig { message }) => {
                assert!(message.contains("17:00 to 08:00"));
            }
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_allowed_dates() {
        let dates = ConfigLoader::load_allowed_dates(config_path()).unwrap();
        assert!(!dates.is_empty());
        assert!(dates.windows(2).all(|pair| pair[0].date <= pair[1].date));
    }

    #[test]
    fn test_missing_dates_file_is_empty() {
        let dates = ConfigLoader::load_allowed_dates("/nonexistent/path").unwrap();
        assert!(dates.is_empty());
    }

    #[test]
    fn test_default_loader_uses_standard_window() {
        let loader = ConfigLoader::default();
        assert_eq!(*loader.window(), BusinessWindow::default());
    }
}
