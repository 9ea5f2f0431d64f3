// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use workout_tracker::error::AppError;

async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_invalid_input_carries_user_alert() {
    let (status, json) = body_json(AppError::InvalidInput).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_input");
    assert_eq!(json["details"], AppError::INVALID_INPUT_ALERT);
}

#[tokio::test]
async fn test_location_unavailable_is_service_unavailable() {
    let (status, json) = body_json(AppError::LocationUnavailable).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "location_unavailable");
    assert_eq!(json["details"], "Could not get your position");
}

#[tokio::test]
async fn test_storage_errors_hide_details() {
    let (status, json) = body_json(AppError::Storage("disk full".to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "storage_error");
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn test_not_found_maps_to_404() {
    let (status, json) = body_json(AppError::NotFound("Workout 7 not found".to_string())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["details"], "Workout 7 not found");
}
