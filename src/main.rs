// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker API Server
//!
//! Serves the workout page's events: location fixes, map clicks, form
//! submissions and list clicks. Workouts persist in a file-backed store.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{config::Config, db::FileStore, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Workout Tracker API");

    // Open the durable store and load saved workouts
    let store = FileStore::open(&config.data_path)?;
    tracing::info!(path = %store.path().display(), "Workout store opened");
    let state = Arc::new(AppState::new(config.clone(), Arc::new(store)));

    // Build router
    let app = workout_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
