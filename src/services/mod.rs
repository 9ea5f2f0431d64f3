// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod ids;
pub mod persistence;
pub mod session;
pub mod store;
pub mod tracker;
pub mod validator;
pub mod view;

pub use ids::IdGenerator;
pub use persistence::PersistenceAdapter;
pub use session::{FormState, MapStatus, Session};
pub use store::WorkoutStore;
pub use tracker::WorkoutTracker;
pub use validator::WorkoutForm;
pub use view::{ListEntry, MapCommand, MapCommands, MapSurface, Marker, ViewUpdate, WorkoutList};
