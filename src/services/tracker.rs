// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout tracker: wires validation, the store, persistence and the views.
//!
//! Handles the flow:
//! 1. Load the stored snapshot and render the list
//! 2. Render markers once the map is ready
//! 3. On submit: validate, build the workout, persist, then render it
//! 4. On a list click: centre the map on the workout

use chrono::{DateTime, Utc};
use std::iter;

use crate::error::{AppError, Result};
use crate::models::{Coordinates, Workout, WorkoutId, WorkoutInput};
use crate::services::ids::IdGenerator;
use crate::services::persistence::PersistenceAdapter;
use crate::services::session::Session;
use crate::services::store::WorkoutStore;
use crate::services::validator::{self, WorkoutForm};
use crate::services::view::{self, MapSurface, WorkoutList};

/// Owns the workouts of one page session. All mutation goes through
/// `&mut self`, so a single owner serializes writes.
pub struct WorkoutTracker {
    store: WorkoutStore,
    persistence: PersistenceAdapter,
    ids: IdGenerator,
    zoom: u8,
}

impl WorkoutTracker {
    /// Load stored workouts and start tracking.
    pub fn open(persistence: PersistenceAdapter, zoom: u8) -> Self {
        let mut ids = IdGenerator::new();
        let store: WorkoutStore = persistence
            .load()
            .into_iter()
            .inspect(|w| ids.observe(w.id()))
            .collect();

        tracing::info!(count = store.len(), key = persistence.key(), "Workout tracker ready");

        Self {
            store,
            persistence,
            ids,
            zoom,
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    pub fn find(&self, id: &WorkoutId) -> Result<&Workout> {
        self.store.find_by_id(id)
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Validate a form and record the workout it describes.
    pub fn submit(&mut self, coordinates: Coordinates, form: &WorkoutForm) -> Result<Workout> {
        let input = validator::validate_form(form)?;
        self.record(coordinates, input)
    }

    /// Record a validated workout created now.
    pub fn record(&mut self, coordinates: Coordinates, input: WorkoutInput) -> Result<Workout> {
        self.record_at(coordinates, input, Utc::now())
    }

    /// Record a validated workout with an explicit creation time.
    ///
    /// The input and position are checked against the same rules the loader
    /// applies, so nothing is written that a reload would reject. The
    /// snapshot including the new workout is written before the store is
    /// updated; if the write fails nothing changes.
    pub fn record_at(
        &mut self,
        coordinates: Coordinates,
        input: WorkoutInput,
        created_at: DateTime<Utc>,
    ) -> Result<Workout> {
        validator::check(&input)?;
        if !coordinates.is_valid() {
            return Err(AppError::BadRequest(format!(
                "Invalid position: {}, {}",
                coordinates.latitude, coordinates.longitude
            )));
        }

        let id = self.ids.next_id(created_at);
        let workout = Workout::new(id, created_at, coordinates, input);

        self.persistence
            .save(self.store.all().iter().chain(iter::once(&workout)))?;
        self.store.add(workout.clone());

        tracing::info!(
            workout_id = %workout.id(),
            kind = %workout.kind(),
            distance_km = workout.distance_km(),
            "Recorded workout"
        );
        Ok(workout)
    }

    pub fn render_list(&self, list: &mut impl WorkoutList) {
        for workout in self.store.all() {
            list.render_entry(&view::to_list_entry(workout));
        }
    }

    pub fn render_markers(&self, map: &mut impl MapSurface) {
        for workout in self.store.all() {
            map.add_marker(&view::to_marker(workout));
        }
    }

    // ─── UI Events ───────────────────────────────────────────────

    /// Geolocation succeeded: centre the map, and draw the deferred markers
    /// the first time it becomes ready. Later fixes only recentre, since
    /// markers added while the map was ready are already on it.
    pub fn on_location_found(
        &self,
        session: &mut Session,
        position: Coordinates,
        map: &mut impl MapSurface,
    ) {
        let became_ready = session.location_found(position);
        map.center_on(position, self.zoom);
        if became_ready {
            self.render_markers(map);
            tracing::debug!(markers = self.store.len(), "Map ready");
        }
    }

    /// Map clicked: open the form at that position.
    pub fn on_map_click(&self, session: &mut Session, coordinates: Coordinates) -> Result<()> {
        session.open_form(coordinates)
    }

    /// Form submitted. On invalid input the form stays open and nothing is
    /// stored.
    pub fn on_submit(
        &mut self,
        session: &mut Session,
        form: &WorkoutForm,
        list: &mut impl WorkoutList,
        map: &mut impl MapSurface,
    ) -> Result<Workout> {
        let coordinates = session.pending_coordinates()?;
        let workout = self.submit(coordinates, form)?;

        session.close_form();
        list.render_entry(&view::to_list_entry(&workout));
        if session.is_map_ready() {
            map.add_marker(&view::to_marker(&workout));
        }
        Ok(workout)
    }

    /// List entry clicked: centre the map on that workout.
    ///
    /// An unknown id is ignored. Returns whether the map was moved.
    pub fn on_list_click(&self, id: &WorkoutId, map: &mut impl MapSurface) -> bool {
        match view::resolve_click(&self.store, id) {
            Ok(coordinates) => {
                map.center_on(coordinates, self.zoom);
                true
            }
            Err(e) => {
                tracing::debug!(workout_id = %id, error = %e, "Ignoring click on unknown workout");
                false
            }
        }
    }
}
