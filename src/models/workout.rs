// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout model: an immutable run or ride with its derived metrics.
//!
//! A `Workout` carries the fields shared by every kind plus a
//! [`WorkoutDetail`] payload for the kind-specific ones. Derived values
//! (pace, speed, description) are computed once in [`Workout::new`] and
//! only read afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::AppError;
use crate::time_utils::format_month_day;

/// Kind of workout (discriminant for dispatch and storage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Storage/wire name ("running" or "cycling").
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn title(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    /// Emoji shown on map markers.
    pub fn emoji(self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(AppError::BadRequest(format!(
                "Unknown workout type: {}",
                other
            ))),
        }
    }
}

/// Latitude/longitude pair in degrees.
///
/// Serialized as `[latitude, longitude]`, the shape map libraries expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are finite and inside the WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.latitude, c.longitude]
    }
}

/// Stable workout identifier, unique within a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Validated Inputs ────────────────────────────────────────

/// Base fields of a run. The `validate` rules are the ones the form
/// validator and the snapshot loader both enforce.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
pub struct RunInput {
    #[validate(range(exclusive_min = 0.0))]
    pub distance_km: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub duration_min: f64,
    #[validate(range(min = 1))]
    pub cadence_spm: u32,
}

/// Base fields of a ride. Elevation gain may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
pub struct RideInput {
    #[validate(range(exclusive_min = 0.0))]
    pub distance_km: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub duration_min: f64,
    #[validate(range(min = 0.0))]
    pub elevation_gain_m: f64,
}

/// Validated input for either kind of workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutInput {
    Run(RunInput),
    Ride(RideInput),
}

impl WorkoutInput {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutInput::Run(_) => WorkoutKind::Running,
            WorkoutInput::Ride(_) => WorkoutKind::Cycling,
        }
    }
}

// ─── Workout ─────────────────────────────────────────────────

/// Run-specific fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Run {
    cadence_spm: u32,
    pace_min_per_km: f64,
}

impl Run {
    /// Cadence in steps per minute.
    pub fn cadence_spm(&self) -> u32 {
        self.cadence_spm
    }

    /// Pace in minutes per kilometre.
    pub fn pace_min_per_km(&self) -> f64 {
        self.pace_min_per_km
    }
}

/// Ride-specific fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ride {
    elevation_gain_m: f64,
    speed_kmh: f64,
}

impl Ride {
    /// Elevation gain in metres.
    pub fn elevation_gain_m(&self) -> f64 {
        self.elevation_gain_m
    }

    /// Average speed in km/h.
    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }
}

/// Kind-specific payload of a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetail {
    Run(Run),
    Ride(Ride),
}

/// One recorded exercise session. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    description: String,
    detail: WorkoutDetail,
}

impl Workout {
    /// Build a workout from validated input, computing its derived fields.
    ///
    /// Inputs must already have passed validation; distance and duration
    /// are assumed strictly positive.
    pub fn new(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        input: WorkoutInput,
    ) -> Self {
        let (distance_km, duration_min, detail) = match input {
            WorkoutInput::Run(run) => (
                run.distance_km,
                run.duration_min,
                WorkoutDetail::Run(Run {
                    cadence_spm: run.cadence_spm,
                    pace_min_per_km: run.duration_min / run.distance_km,
                }),
            ),
            WorkoutInput::Ride(ride) => (
                ride.distance_km,
                ride.duration_min,
                WorkoutDetail::Ride(Ride {
                    elevation_gain_m: ride.elevation_gain_m,
                    speed_kmh: ride.distance_km / (ride.duration_min / 60.0),
                }),
            ),
        };

        let description = describe(input.kind(), created_at);

        Self {
            id,
            created_at,
            coordinates,
            distance_km,
            duration_min,
            description,
            detail,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    /// Human-readable label, e.g. "Running on April 14".
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn detail(&self) -> &WorkoutDetail {
        &self.detail
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.detail {
            WorkoutDetail::Run(_) => WorkoutKind::Running,
            WorkoutDetail::Ride(_) => WorkoutKind::Cycling,
        }
    }

    /// Pace in min/km, only for runs.
    pub fn pace_min_per_km(&self) -> Option<f64> {
        match &self.detail {
            WorkoutDetail::Run(run) => Some(run.pace_min_per_km()),
            WorkoutDetail::Ride(_) => None,
        }
    }

    /// Speed in km/h, only for rides.
    pub fn speed_kmh(&self) -> Option<f64> {
        match &self.detail {
            WorkoutDetail::Run(_) => None,
            WorkoutDetail::Ride(ride) => Some(ride.speed_kmh()),
        }
    }

    /// The validated base fields this workout was built from.
    pub fn input(&self) -> WorkoutInput {
        match &self.detail {
            WorkoutDetail::Run(run) => WorkoutInput::Run(RunInput {
                distance_km: self.distance_km,
                duration_min: self.duration_min,
                cadence_spm: run.cadence_spm,
            }),
            WorkoutDetail::Ride(ride) => WorkoutInput::Ride(RideInput {
                distance_km: self.distance_km,
                duration_min: self.duration_min,
                elevation_gain_m: ride.elevation_gain_m,
            }),
        }
    }
}

fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.title(), format_month_day(created_at))
}
