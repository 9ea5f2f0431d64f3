// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable string-keyed storage.
//!
//! The workout snapshot lives under a single key; the store itself knows
//! nothing about workouts.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::AppError;

/// Opaque key-value store holding string values.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}
