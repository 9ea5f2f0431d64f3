// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout Tracker: record runs and rides by clicking on a map.
//!
//! This crate provides the workout domain model, validation, snapshot
//! persistence and the list/map projections, plus the HTTP API the
//! browser page talks to.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::KeyValueStore;
use services::{PersistenceAdapter, Session, WorkoutTracker};
use std::sync::Arc;
use tokio::sync::Mutex;

/// The tracker together with the UI state of the page driving it.
pub struct Workspace {
    pub tracker: WorkoutTracker,
    pub session: Session,
}

/// Shared application state.
///
/// Every event locks the workspace, so store and snapshot mutations have a
/// single writer at a time. The mutex sits behind an `Arc` so a handler can
/// move its guard onto a blocking thread for snapshot writes.
pub struct AppState {
    pub config: Config,
    pub workspace: Arc<Mutex<Workspace>>,
}

impl AppState {
    /// Load stored workouts from `kv` and build the state.
    pub fn new(config: Config, kv: Arc<dyn KeyValueStore>) -> Self {
        let persistence = PersistenceAdapter::new(kv, config.storage_key.clone());
        let tracker = WorkoutTracker::open(persistence, config.map_zoom);

        Self {
            config,
            workspace: Arc::new(Mutex::new(Workspace {
                tracker,
                session: Session::new(),
            })),
        }
    }
}
