// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Default zoom level when centring the map on a position or workout.
pub const DEFAULT_MAP_ZOOM: u8 = 12;

/// Default key under which the workout snapshot is stored.
pub const DEFAULT_STORAGE_KEY: &str = "workouts";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// File backing the durable key-value store
    pub data_path: PathBuf,
    /// Key holding the serialized workout snapshot
    pub storage_key: String,
    /// Zoom level used by map commands
    pub map_zoom: u8,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_path: PathBuf::from("data/workouts.json"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            map_zoom: DEFAULT_MAP_ZOOM,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            data_path: env::var("WORKOUTS_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/workouts.json")),
            storage_key: env::var("WORKOUTS_STORAGE_KEY")
                .map(|v| v.trim().to_string())
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            map_zoom: parse_var("MAP_ZOOM_LEVEL", DEFAULT_MAP_ZOOM)?,
        })
    }
}

/// Read an optional numeric variable, rejecting values that do not parse.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw.clone())),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
