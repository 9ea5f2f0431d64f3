// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid workout input")]
    InvalidInput,

    #[error("Location unavailable")]
    LocationUnavailable,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Corrupt persisted data: {0}")]
    CorruptPersistedData(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Alert shown to the user when a submitted form fails validation.
    pub const INVALID_INPUT_ALERT: &'static str = "Inputs have to be positive numbers!";

    /// Alert shown to the user when geolocation fails.
    pub const LOCATION_UNAVAILABLE_ALERT: &'static str = "Could not get your position";
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::InvalidInput => (
                StatusCode::BAD_REQUEST,
                "invalid_input",
                Some(Self::INVALID_INPUT_ALERT.to_string()),
            ),
            AppError::LocationUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "location_unavailable",
                Some(Self::LOCATION_UNAVAILABLE_ALERT.to_string()),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::CorruptPersistedData(msg) => {
                tracing::error!(error = %msg, "Corrupt persisted data");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
