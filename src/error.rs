//! Error types for the Compensated Hours Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while recording and accounting
//! compensated hours.

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// The main error type for the Compensated Hours Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use compensated_hours::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but describes an unusable setup.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },

    /// An input field was not in the expected shape.
    #[error("Malformed input for '{field}': {message}")]
    MalformedInput {
        /// The offending field.
        field: String,
        /// A description of what was wrong.
        message: String,
    },

    /// The entry does not qualify for compensation.
    #[error("Entry rejected: {reason}")]
    ValidationRejected {
        /// Human-readable rejection reason.
        reason: String,
    },

    /// Another record already exists for the same employee and date.
    #[error("Employee '{employee_id}' already has a record for date '{date_id}'")]
    DuplicateEntry {
        /// The employee owning both records.
        employee_id: String,
        /// The allowed date both records reference.
        date_id: String,
    },

    /// The caller lacks the permission the operation requires.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// What was attempted.
        message: String,
    },

    /// No profile exists for the given employee.
    #[error("Profile not found: {employee_id}")]
    ProfileNotFound {
        /// The employee id that was looked up.
        employee_id: String,
    },

    /// No record exists with the given id.
    #[error("Record not found: {record_id}")]
    RecordNotFound {
        /// The record id that was looked up.
        record_id: Uuid,
    },

    /// The backing store failed. Passed through untouched.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
