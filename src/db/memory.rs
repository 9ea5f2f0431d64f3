// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory key-value store, used for tests and ephemeral sessions.

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::db::KeyValueStore;
use crate::error::AppError;

/// Key-value store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
