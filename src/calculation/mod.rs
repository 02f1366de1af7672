//! Calculation logic for the Compensated Hours Engine.
//!
//! This module contains the rules that turn attendance entries into
//! compensated hours, the eligibility check applied before an entry is
//! stored, per-employee progress aggregation, target completion detection,
//! organization-wide aggregation for administrators, and the per-record
//! ledger.

mod compensated_hours;
mod completion;
mod entry_validation;
mod fleet;
mod ledger;
mod progress;

pub use compensated_hours::{
    CompensatedHoursResult, HOURS_DECIMAL_PLACES, calculate_compensated_hours, compensated_hours,
    minutes_to_hours, window_overflow_minutes,
};
pub use completion::detect_target_crossing;
pub use entry_validation::{EntryValidation, NO_QUALIFYING_HOURS_REASON, validate_entry};
pub use fleet::{AdminCapability, group_records_by_employee, summarize_fleet};
pub use ledger::{LedgerLine, build_ledger};
pub use progress::{record_hours, summarize_progress};
