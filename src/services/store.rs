// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory workout collection in insertion order.

use crate::error::{AppError, Result};
use crate::models::{Workout, WorkoutId};

/// Ordered collection of workouts. Append-only.
#[derive(Debug, Default, Clone)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a workout. Ids are unique by construction, so this never fails.
    pub fn add(&mut self, workout: Workout) {
        debug_assert!(
            !self.contains(workout.id()),
            "duplicate workout id {}",
            workout.id()
        );
        self.workouts.push(workout);
    }

    /// All workouts in insertion order.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn find_by_id(&self, id: &WorkoutId) -> Result<&Workout> {
        self.workouts
            .iter()
            .find(|w| w.id() == id)
            .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))
    }

    pub fn contains(&self, id: &WorkoutId) -> bool {
        self.workouts.iter().any(|w| w.id() == id)
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}

impl FromIterator<Workout> for WorkoutStore {
    fn from_iter<I: IntoIterator<Item = Workout>>(iter: I) -> Self {
        let mut store = Self::new();
        for workout in iter {
            store.add(workout);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, RunInput, WorkoutInput};
    use chrono::Utc;

    fn workout(id: &str) -> Workout {
        Workout::new(
            WorkoutId::new(id),
            Utc::now(),
            Coordinates::new(51.5, -0.1),
            WorkoutInput::Run(RunInput {
                distance_km: 5.0,
                duration_min: 30.0,
                cadence_spm: 160,
            }),
        )
    }

    #[test]
    fn test_add_then_find() {
        let mut store = WorkoutStore::new();
        let w = workout("1");
        store.add(w.clone());

        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id(&WorkoutId::new("1")).unwrap(), &w);
    }

    #[test]
    fn test_find_unknown_id_is_not_found() {
        let store: WorkoutStore = vec![workout("1")].into_iter().collect();

        let err = store.find_by_id(&WorkoutId::new("2")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_preserves_insertion_order() {
        let store: WorkoutStore = ["3", "1", "2"].into_iter().map(workout).collect();

        let ids: Vec<&str> = store.all().iter().map(|w| w.id().as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }
}
