// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod record;
pub mod workout;

pub use record::{RideRecord, RunRecord, WorkoutRecord};
pub use workout::{
    Coordinates, Ride, RideInput, Run, RunInput, Workout, WorkoutDetail, WorkoutId, WorkoutInput,
    WorkoutKind,
};
