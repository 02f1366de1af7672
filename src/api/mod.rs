//! HTTP API module for the Compensated Hours Engine.
//!
//! This module exposes the engine's operations as REST endpoints. The
//! caller's identity is read from the `x-employee-id` and
//! `x-employee-email` headers set by the upstream session layer.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{EMAIL_HEADER, EMPLOYEE_ID_HEADER, create_router};
pub use request::{EntryRequest, RegisterProfileRequest, UpdateProfileRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
