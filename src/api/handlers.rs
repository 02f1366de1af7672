//! HTTP request handlers for the Compensated Hours Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{EntryDraft, Identity};

use super::request::{EntryRequest, RegisterProfileRequest, UpdateProfileRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Header carrying the signed-in employee's id.
pub const EMPLOYEE_ID_HEADER: &str = "x-employee-id";

/// Header carrying the signed-in employee's email.
pub const EMAIL_HEADER: &str = "x-employee-email";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/dates", get(list_dates_handler))
        .route("/profile", put(register_profile_handler))
        .route("/profiles/:id", put(update_profile_handler))
        .route("/records", get(list_records_handler).post(submit_entry_handler))
        .route(
            "/records/:id",
            put(edit_entry_handler).delete(delete_entry_handler),
        )
        .route("/summary", get(summary_handler))
        .route("/report", get(report_handler))
        .with_state(state)
}

/// Resolves the caller from the identity headers.
///
/// Both headers, including the email that grants the administrator role, are
/// taken as given. They must be set by a trusted upstream session layer that
/// strips any client-supplied copies before forwarding the request.
fn caller(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiErrorResponse> {
    let employee_id = headers
        .get(EMPLOYEE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(ApiErrorResponse::missing_identity)?;
    let email = headers
        .get(EMAIL_HEADER)
        .and_then(|value| value.to_str().ok());

    Ok(state
        .service()
        .config()
        .resolve_identity(employee_id, email))
}

fn json_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("MISSING_FIELD", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse::bad_request(error))
        }
    }
}

fn record_id(
    correlation_id: Uuid,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Uuid, ApiErrorResponse> {
    path.map(|Path(id)| id).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Bad record id");
        ApiErrorResponse::bad_request(ApiError::with_details(
            "MALFORMED_INPUT",
            "Record id must be a UUID",
            rejection.body_text(),
        ))
    })
}

/// Turns an engine result into a JSON response and logs the outcome.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &'static str,
    started: Instant,
    success: StatusCode,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us = started.elapsed().as_micros(),
                "Request completed"
            );
            (
                success,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /dates.
async fn list_dates_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    respond(
        correlation_id,
        "list_dates",
        started,
        StatusCode::OK,
        state.service().allowed_dates(),
    )
}

/// Handler for PUT /profile.
async fn register_profile_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RegisterProfileRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let identity = caller(&state, &headers)?;
    let request = json_body(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %identity.employee_id,
        "Registering profile"
    );

    let email = headers
        .get(EMAIL_HEADER)
        .and_then(|value| value.to_str().ok());
    let result = state.service().register_profile(
        &identity,
        &request.display_name,
        email,
        request.target_hours,
    );
    Ok(respond(
        correlation_id,
        "register_profile",
        started,
        StatusCode::OK,
        result,
    ))
}

/// Handler for PUT /profiles/:id.
async fn update_profile_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(employee_id): Path<String>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let identity = caller(&state, &headers)?;
    let request = json_body(correlation_id, payload)?;

    let result = state
        .service()
        .update_profile(&identity, &employee_id, request.into());
    Ok(respond(
        correlation_id,
        "update_profile",
        started,
        StatusCode::OK,
        result,
    ))
}

/// Handler for GET /records.
///
/// Returns the caller's records with their per-day totals, newest first.
async fn list_records_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let identity = caller(&state, &headers)?;

    Ok(respond(
        correlation_id,
        "ledger",
        started,
        StatusCode::OK,
        state.service().ledger(&identity),
    ))
}

/// Handler for POST /records.
async fn submit_entry_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<EntryRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let identity = caller(&state, &headers)?;
    let request = json_body(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %identity.employee_id,
        date_id = %request.date_id,
        "Processing entry submission"
    );

    let result = EntryDraft::try_from(request)
        .and_then(|draft| state.service().submit_entry(&identity, draft));
    Ok(respond(
        correlation_id,
        "submit_entry",
        started,
        StatusCode::CREATED,
        result,
    ))
}

/// Handler for PUT /records/:id.
async fn edit_entry_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<EntryRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let identity = caller(&state, &headers)?;
    let id = record_id(correlation_id, path)?;
    let request = json_body(correlation_id, payload)?;

    let result = EntryDraft::try_from(request)
        .and_then(|draft| state.service().edit_entry(&identity, id, draft));
    Ok(respond(
        correlation_id,
        "edit_entry",
        started,
        StatusCode::OK,
        result,
    ))
}

/// Handler for DELETE /records/:id.
///
/// Responds with the caller's summary after the deletion.
async fn delete_entry_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let identity = caller(&state, &headers)?;
    let id = record_id(correlation_id, path)?;

    Ok(respond(
        correlation_id,
        "delete_entry",
        started,
        StatusCode::OK,
        state.service().delete_entry(&identity, id),
    ))
}

/// Handler for GET /summary.
async fn summary_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let identity = caller(&state, &headers)?;

    Ok(respond(
        correlation_id,
        "summary",
        started,
        StatusCode::OK,
        state.service().summary(&identity),
    ))
}

/// Handler for GET /report. Administrators only.
async fn report_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let identity = caller(&state, &headers)?;

    Ok(respond(
        correlation_id,
        "fleet_report",
        started,
        StatusCode::OK,
        state.service().fleet_report(&identity),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::config::{ConfigLoader, EngineConfig};
    use crate::service::CompensationService;
    use crate::store::InMemoryStore;

    fn create_test_state() -> AppState {
        let config = EngineConfig::default().with_administrators(["admin@example.com"]);
        let service = CompensationService::in_memory(
            Arc::new(InMemoryStore::new()),
            ConfigLoader::from_config(config).unwrap(),
        );
        AppState::new(service)
    }

    async fn send(
        router: Router,
        method: &str,
        uri: &str,
        employee_id: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = employee_id {
            builder = builder.header(EMPLOYEE_ID_HEADER, id);
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_submit_entry_returns_201() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "POST",
            "/records",
            Some("emp_001"),
            Some(json!({"date_id": "d1", "arrival_time": "07:00"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["record"]["employee_id"], "emp_001");
        assert_eq!(body["audit_steps"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_identity_returns_401() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, "GET", "/summary", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "MISSING_IDENTITY");
    }

    #[tokio::test]
    async fn test_rejected_entry_returns_422() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "POST",
            "/records",
            Some("emp_001"),
            Some(json!({"date_id": "d1", "arrival_time": "08:15", "departure_time": "16:45"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["message"],
            "no qualifying compensation window or manual hours"
        );
    }

    #[tokio::test]
    async fn test_malformed_time_returns_400() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "POST",
            "/records",
            Some("emp_001"),
            Some(json!({"date_id": "d1", "arrival_time": "25:99"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_INPUT");
        assert_eq!(body["details"], "arrival_time");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/records")
                    .header(EMPLOYEE_ID_HEADER, "emp_001")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_record_id_returns_400() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, "DELETE", "/records/not-a-uuid", Some("emp_001"), None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_INPUT");
    }

    #[tokio::test]
    async fn test_report_forbidden_for_employee() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, "GET", "/report", Some("emp_001"), None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FORBIDDEN");
    }

    #[test]
    fn test_caller_role_comes_from_forwarded_email() {
        let state = create_test_state();

        let mut headers = HeaderMap::new();
        headers.insert(EMPLOYEE_ID_HEADER, " boss ".parse().unwrap());
        let plain = caller(&state, &headers).unwrap();
        assert_eq!(plain.employee_id, "boss");
        assert!(!plain.is_administrator());

        headers.insert(EMAIL_HEADER, "Admin@Example.com".parse().unwrap());
        assert!(caller(&state, &headers).unwrap().is_administrator());

        headers.insert(EMPLOYEE_ID_HEADER, "   ".parse().unwrap());
        let err = caller(&state, &headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
