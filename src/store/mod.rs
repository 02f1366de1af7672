//! Boundary to the backing record store.
//!
//! The engine treats persistence as a black box reached through the
//! [`RecordStore`] and [`AllowedDateSource`] traits. Failures come back as
//! [`StoreError`] and are passed to the caller unchanged.

mod memory;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{AllowedDate, EmployeeProfile, EntryDraft, TimeRecord};

pub use memory::InMemoryStore;

/// Errors reported by a store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or did not answer.
    #[error("Store unavailable: {message}")]
    Unavailable {
        /// Description from the transport.
        message: String,
    },

    /// The store refused the request.
    #[error("Store rejected the request: {message}")]
    Rejected {
        /// Description from the store.
        message: String,
    },

    /// The addressed record does not exist in the store.
    #[error("Store has no record {id}")]
    NotFound {
        /// The missing record id.
        id: Uuid,
    },
}

/// A type alias for Results that return StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for time records and employee profiles.
pub trait RecordStore: Send + Sync {
    /// Lists records, all of them or only those owned by `employee_id`.
    fn list(&self, employee_id: Option<&str>) -> StoreResult<Vec<TimeRecord>>;

    /// Fetches one record.
    fn get(&self, id: Uuid) -> StoreResult<Option<TimeRecord>>;

    /// Stores a new record and returns it as stored.
    fn create(&self, record: TimeRecord) -> StoreResult<TimeRecord>;

    /// Replaces the editable fields of a record.
    fn update(&self, id: Uuid, fields: EntryDraft) -> StoreResult<TimeRecord>;

    /// Removes a record.
    fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// Fetches one employee profile.
    fn profile(&self, employee_id: &str) -> StoreResult<Option<EmployeeProfile>>;

    /// Lists every employee profile.
    fn profiles(&self) -> StoreResult<Vec<EmployeeProfile>>;

    /// Creates or replaces a profile.
    fn save_profile(&self, profile: EmployeeProfile) -> StoreResult<EmployeeProfile>;
}

/// Read-only source of the dates open for logging.
pub trait AllowedDateSource: Send + Sync {
    /// Lists allowed dates, earliest first.
    fn allowed_dates(&self) -> StoreResult<Vec<AllowedDate>>;
}
