// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Stored workout record (one element of the persisted snapshot).
//!
//! Only base fields are written; pace, speed and description are
//! re-derived when a record is turned back into a [`Workout`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::workout::{Coordinates, Workout, WorkoutDetail, WorkoutId};

/// Snapshot element, tagged by `kind` ("running" or "cycling").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkoutRecord {
    Running(RunRecord),
    Cycling(RideRecord),
}

/// Stored run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub id: WorkoutId,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    pub created_at: DateTime<Utc>,
    pub cadence_spm: u32,
}

/// Stored ride.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRecord {
    pub id: WorkoutId,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    pub created_at: DateTime<Utc>,
    pub elevation_gain_m: f64,
}

impl WorkoutRecord {
    pub fn id(&self) -> &WorkoutId {
        match self {
            WorkoutRecord::Running(r) => &r.id,
            WorkoutRecord::Cycling(r) => &r.id,
        }
    }
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        match workout.detail() {
            WorkoutDetail::Run(run) => WorkoutRecord::Running(RunRecord {
                id: workout.id().clone(),
                coordinates: workout.coordinates(),
                distance_km: workout.distance_km(),
                duration_min: workout.duration_min(),
                created_at: workout.created_at(),
                cadence_spm: run.cadence_spm(),
            }),
            WorkoutDetail::Ride(ride) => WorkoutRecord::Cycling(RideRecord {
                id: workout.id().clone(),
                coordinates: workout.coordinates(),
                distance_km: workout.distance_km(),
                duration_min: workout.duration_min(),
                created_at: workout.created_at(),
                elevation_gain_m: ride.elevation_gain_m(),
            }),
        }
    }
}
