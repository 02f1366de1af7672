//! Response types for the Compensated Hours Engine API.
//!
//! This module defines the error response structures and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::store::StoreError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// The 401 response for requests without a caller identity.
    pub fn missing_identity() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::with_details(
                "MISSING_IDENTITY",
                "No signed-in employee",
                "The x-employee-id header is required",
            ),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::MalformedInput { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details("MALFORMED_INPUT", message, field),
            },
            EngineError::ValidationRejected { reason } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details("ENTRY_REJECTED", reason, message),
            },
            EngineError::DuplicateEntry { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("DUPLICATE_ENTRY", message),
            },
            EngineError::Forbidden { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("FORBIDDEN", message),
            },
            EngineError::ProfileNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("PROFILE_NOT_FOUND", message),
            },
            EngineError::RecordNotFound { .. } | EngineError::Store(StoreError::NotFound { .. }) => {
                ApiErrorResponse {
                    status: StatusCode::NOT_FOUND,
                    error: ApiError::new("RECORD_NOT_FOUND", message),
                }
            }
            EngineError::Store(_) => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details("STORE_ERROR", "Record store failed", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_rejection_maps_to_422() {
        let response: ApiErrorResponse = EngineError::ValidationRejected {
            reason: "no qualifying compensation window or manual hours".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.error.code, "ENTRY_REJECTED");
        assert_eq!(
            response.error.message,
            "no qualifying compensation window or manual hours"
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases = vec![
            (
                EngineError::MalformedInput {
                    field: "arrival_time".to_string(),
                    message: "bad".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                EngineError::DuplicateEntry {
                    employee_id: "a".to_string(),
                    date_id: "d1".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                EngineError::Forbidden {
                    message: "no".to_string(),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                EngineError::RecordNotFound {
                    record_id: Uuid::nil(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                EngineError::Store(StoreError::Unavailable {
                    message: "timeout".to_string(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (error, expected) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, expected, "code {}", response.error.code);
        }
    }
}
