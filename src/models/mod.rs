//! Core data models for the Compensated Hours Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allowed_date;
mod audit;
mod clock_time;
mod employee;
mod progress;
mod time_record;

pub use allowed_date::{AllowedDate, lookup_date};
pub use audit::AuditStep;
pub use clock_time::{ClockTime, ParseClockTimeError};
pub use employee::{EmployeeProfile, Identity, ProfileChanges, Role};
pub use progress::{EmployeeProgress, FleetReport, ProgressSummary};
pub use time_record::{EntryDraft, MAX_OTHER_HOURS, TimeRecord};
