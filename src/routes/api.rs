// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes driven by the workout page.
//!
//! Each page event (location fix, map click, form submit, list click) maps
//! to one endpoint. Responses carry the list entries and map commands the
//! page should apply.

use crate::error::{AppError, Result};
use crate::models::{Coordinates, WorkoutId};
use crate::services::{ListEntry, MapCommands, ViewUpdate, WorkoutForm};
use crate::{AppState, Workspace};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(submit_workout))
        .route("/api/workouts/{id}/focus", post(focus_workout))
        .route("/api/location", post(location_found))
        .route("/api/location/error", post(location_failed))
        .route("/api/map/click", post(map_click))
}

/// A position reported by the browser (geolocation fix or map click).
#[derive(Debug, Deserialize)]
struct PositionRequest {
    latitude: f64,
    longitude: f64,
}

impl PositionRequest {
    fn into_coordinates(self) -> Result<Coordinates> {
        let coordinates = Coordinates::new(self.latitude, self.longitude);
        if !coordinates.is_valid() {
            return Err(AppError::BadRequest(format!(
                "Invalid position: {}, {}",
                self.latitude, self.longitude
            )));
        }
        Ok(coordinates)
    }
}

// ─── Workouts ────────────────────────────────────────────────

/// List all workouts in the order they were recorded.
async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<ListEntry>> {
    let workspace = state.workspace.lock().await;
    let mut entries = Vec::with_capacity(workspace.tracker.workouts().len());
    workspace.tracker.render_list(&mut entries);
    Json(entries)
}

/// Run `f` on the locked workspace from a blocking thread.
///
/// Recording a workout writes the snapshot through the key-value store,
/// which may be synchronous file I/O. The lock is held until `f` returns.
async fn with_workspace<F, T>(state: &AppState, f: F) -> Result<T>
where
    F: FnOnce(&mut Workspace) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let mut workspace = state.workspace.clone().lock_owned().await;
    tokio::task::spawn_blocking(move || f(&mut workspace))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Workspace task failed: {}", e)))?
}

/// Submit the open workout form.
async fn submit_workout(
    State(state): State<Arc<AppState>>,
    Json(form): Json<WorkoutForm>,
) -> Result<(StatusCode, Json<ViewUpdate>)> {
    let kind = form.kind.clone();
    let result = with_workspace(&state, move |workspace| {
        let Workspace { tracker, session } = workspace;
        let mut update = ViewUpdate::default();
        let workout =
            tracker.on_submit(session, &form, &mut update.entries, &mut update.commands)?;
        Ok((workout, update))
    })
    .await;

    if let Err(AppError::InvalidInput) = &result {
        tracing::info!(kind = %kind, "Rejected workout form");
    }
    let (workout, update) = result?;

    tracing::debug!(workout_id = %workout.id(), "Workout form accepted");
    Ok((StatusCode::CREATED, Json(update)))
}

/// A list entry was clicked. Unknown ids produce no map commands.
async fn focus_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<MapCommands> {
    let workspace = state.workspace.lock().await;
    let mut commands = MapCommands::new();
    workspace
        .tracker
        .on_list_click(&WorkoutId::new(id), &mut commands);
    Json(commands)
}

// ─── Map ─────────────────────────────────────────────────────

/// Geolocation succeeded: centre the map and return the stored markers.
async fn location_found(
    State(state): State<Arc<AppState>>,
    Json(position): Json<PositionRequest>,
) -> Result<Json<MapCommands>> {
    let position = position.into_coordinates()?;

    let mut workspace = state.workspace.lock().await;
    let Workspace { tracker, session } = &mut *workspace;

    let mut commands = MapCommands::new();
    tracker.on_location_found(session, position, &mut commands);

    tracing::info!(
        latitude = position.latitude,
        longitude = position.longitude,
        "Map centred on current position"
    );
    Ok(Json(commands))
}

/// Geolocation failed: the map stays unavailable.
async fn location_failed(State(state): State<Arc<AppState>>) -> AppError {
    let mut workspace = state.workspace.lock().await;
    tracing::warn!("Geolocation failed, map unavailable");
    workspace.session.location_failed()
}

#[derive(Serialize)]
struct FormOpenedResponse {
    coordinates: Coordinates,
}

/// The map was clicked: open the workout form at that position.
async fn map_click(
    State(state): State<Arc<AppState>>,
    Json(position): Json<PositionRequest>,
) -> Result<Json<FormOpenedResponse>> {
    let coordinates = position.into_coordinates()?;

    let mut workspace = state.workspace.lock().await;
    let Workspace { tracker, session } = &mut *workspace;
    tracker.on_map_click(session, coordinates)?;

    Ok(Json(FormOpenedResponse { coordinates }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_request_validation() {
        let ok = PositionRequest {
            latitude: 51.5,
            longitude: -0.1,
        };
        assert_eq!(ok.into_coordinates().unwrap(), Coordinates::new(51.5, -0.1));

        let bad = PositionRequest {
            latitude: 95.0,
            longitude: 0.0,
        };
        assert!(matches!(
            bad.into_coordinates(),
            Err(AppError::BadRequest(_))
        ));
    }
}
