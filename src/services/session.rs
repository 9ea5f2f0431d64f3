// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-page UI state: whether the map is up and whether the form is open.
//!
//! Passed explicitly to the tracker's event handlers so the domain code
//! holds no UI state of its own.

use crate::error::{AppError, Result};
use crate::models::Coordinates;

/// Map lifecycle, driven by the geolocation result.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MapStatus {
    /// Waiting for a location fix.
    #[default]
    Locating,
    Ready {
        center: Coordinates,
    },
    /// Geolocation failed; the map never initializes.
    Unavailable,
}

/// Workout form state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FormState {
    #[default]
    Idle,
    /// Opened by a map click at `coordinates`.
    Open { coordinates: Coordinates },
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    map: MapStatus,
    form: FormState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&self) -> MapStatus {
        self.map
    }

    pub fn form(&self) -> FormState {
        self.form
    }

    pub fn is_map_ready(&self) -> bool {
        matches!(self.map, MapStatus::Ready { .. })
    }

    /// Mark the map ready at `center`. Returns true when it was not
    /// ready before.
    pub fn location_found(&mut self, center: Coordinates) -> bool {
        let was_ready = self.is_map_ready();
        self.map = MapStatus::Ready { center };
        !was_ready
    }

    /// Mark the map unavailable; returns the error to report to the user.
    pub fn location_failed(&mut self) -> AppError {
        self.map = MapStatus::Unavailable;
        self.form = FormState::Idle;
        AppError::LocationUnavailable
    }

    /// Open the form at a clicked map position.
    pub fn open_form(&mut self, coordinates: Coordinates) -> Result<()> {
        if !self.is_map_ready() {
            return Err(AppError::LocationUnavailable);
        }
        self.form = FormState::Open { coordinates };
        Ok(())
    }

    /// Coordinates of the open form.
    pub fn pending_coordinates(&self) -> Result<Coordinates> {
        match self.form {
            FormState::Open { coordinates } => Ok(coordinates),
            FormState::Idle => Err(AppError::BadRequest(
                "No workout form is open; click the map first".to_string(),
            )),
        }
    }

    pub fn close_form(&mut self) {
        self.form = FormState::Idle;
    }
}
