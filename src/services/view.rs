// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View projections of workouts: list entries and map markers.
//!
//! The list and the map are external collaborators reached through the
//! [`WorkoutList`] and [`MapSurface`] traits. [`MapCommands`] records map
//! operations so they can be shipped to the browser as JSON.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::Result;
use crate::models::{Coordinates, Workout, WorkoutDetail, WorkoutId, WorkoutKind};
use crate::services::store::WorkoutStore;
use crate::time_utils::format_utc_rfc3339;

/// One row of the workout list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub id: WorkoutId,
    #[cfg_attr(feature = "binding-generation", ts(type = "\"running\" | \"cycling\""))]
    pub kind: WorkoutKind,
    pub description: String,
    pub created_at: String,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Pace (min/km) for runs, speed (km/h) for rides
    pub pace_or_speed: f64,
    pub pace_or_speed_unit: String,
    /// Cadence (spm) for runs, elevation gain (m) for rides
    pub secondary_metric: f64,
    pub secondary_unit: String,
}

/// A marker pinned on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub coordinates: Coordinates,
    pub label: String,
}

/// Rendering target for map operations.
pub trait MapSurface {
    fn center_on(&mut self, coordinates: Coordinates, zoom: u8);
    fn add_marker(&mut self, marker: &Marker);
}

/// Rendering target for list entries.
pub trait WorkoutList {
    fn render_entry(&mut self, entry: &ListEntry);
}

impl WorkoutList for Vec<ListEntry> {
    fn render_entry(&mut self, entry: &ListEntry) {
        self.push(entry.clone());
    }
}

/// A recorded map operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MapCommand {
    CenterOn { coordinates: Coordinates, zoom: u8 },
    AddMarker(Marker),
}

/// Map operations in the order they were issued.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MapCommands(Vec<MapCommand>);

impl MapCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[MapCommand] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl MapSurface for MapCommands {
    fn center_on(&mut self, coordinates: Coordinates, zoom: u8) {
        self.0.push(MapCommand::CenterOn { coordinates, zoom });
    }

    fn add_marker(&mut self, marker: &Marker) {
        self.0.push(MapCommand::AddMarker(marker.clone()));
    }
}

/// List entries and map commands produced by one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewUpdate {
    pub entries: Vec<ListEntry>,
    pub commands: MapCommands,
}

pub fn to_list_entry(workout: &Workout) -> ListEntry {
    let (pace_or_speed, pace_or_speed_unit, secondary_metric, secondary_unit) =
        match workout.detail() {
            WorkoutDetail::Run(run) => (
                run.pace_min_per_km(),
                "min/km",
                f64::from(run.cadence_spm()),
                "spm",
            ),
            WorkoutDetail::Ride(ride) => (ride.speed_kmh(), "km/h", ride.elevation_gain_m(), "m"),
        };

    ListEntry {
        id: workout.id().clone(),
        kind: workout.kind(),
        description: workout.description().to_string(),
        created_at: format_utc_rfc3339(workout.created_at()),
        distance_km: workout.distance_km(),
        duration_min: workout.duration_min(),
        pace_or_speed,
        pace_or_speed_unit: pace_or_speed_unit.to_string(),
        secondary_metric,
        secondary_unit: secondary_unit.to_string(),
    }
}

pub fn to_marker(workout: &Workout) -> Marker {
    Marker {
        coordinates: workout.coordinates(),
        label: format!("{} {}", workout.kind().emoji(), workout.description()),
    }
}

/// Resolve a list-entry click to the coordinates the map should centre on.
pub fn resolve_click(store: &WorkoutStore, id: &WorkoutId) -> Result<Coordinates> {
    store.find_by_id(id).map(Workout::coordinates)
}
