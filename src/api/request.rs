//! Request types for the Compensated Hours Engine API.
//!
//! Bodies arrive as raw form values. Times are plain strings here and are
//! only turned into [`ClockTime`](crate::models::ClockTime) values when the
//! request is converted into an [`EntryDraft`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{EntryDraft, ProfileChanges};

/// Request body for `POST /records` and `PUT /records/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRequest {
    /// The allowed date being logged.
    pub date_id: String,
    /// Arrival time as `HH:MM`; blank or absent means not recorded.
    #[serde(default)]
    pub arrival_time: Option<String>,
    /// Departure time as `HH:MM`; blank or absent means not recorded.
    #[serde(default)]
    pub departure_time: Option<String>,
    /// Manually declared hours; absent means zero.
    #[serde(default)]
    pub other_hours: Option<Decimal>,
}

impl TryFrom<EntryRequest> for EntryDraft {
    type Error = EngineError;

    fn try_from(req: EntryRequest) -> Result<Self, Self::Error> {
        EntryDraft::parse(
            &req.date_id,
            req.arrival_time.as_deref(),
            req.departure_time.as_deref(),
            req.other_hours,
        )
    }
}

/// Request body for `PUT /profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterProfileRequest {
    /// Name shown in greetings and reports.
    pub display_name: String,
    /// Hours to compensate.
    #[serde(default)]
    pub target_hours: Option<Decimal>,
}

/// Request body for `PUT /profiles/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// New compensation target.
    #[serde(default)]
    pub target_hours: Option<Decimal>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileChanges {
            display_name: req.display_name,
            target_hours: req.target_hours,
        }
    }
}
