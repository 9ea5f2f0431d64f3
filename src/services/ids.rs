// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout identifier generation.

use chrono::{DateTime, Utc};

use crate::models::WorkoutId;

/// Mints ids from epoch milliseconds, never handing out the same value twice.
///
/// When the clock has not advanced past the last issued value (two workouts
/// in the same millisecond, or the clock stepping backwards) the previous
/// value plus one is used instead.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an id that is already in use so it is never reissued.
    /// Non-numeric ids cannot collide with generated ones and are ignored.
    pub fn observe(&mut self, id: &WorkoutId) {
        if let Ok(value) = id.as_str().parse::<u64>() {
            self.last = self.last.max(value);
        }
    }

    /// Issue the next id for a workout created at `now`.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> WorkoutId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let value = if millis > self.last {
            millis
        } else {
            self.last.saturating_add(1)
        };
        self.last = value;
        WorkoutId::new(value.to_string())
    }
}
