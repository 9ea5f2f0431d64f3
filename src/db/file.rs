// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed key-value store.
//!
//! All entries are kept in memory and written through to a single JSON
//! object on disk. Writes go to a temporary file that is then renamed over
//! the target, so a crash never leaves a half-written store behind.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::db::KeyValueStore;
use crate::error::AppError;

/// Key-value store persisted as one JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: DashMap<String, String>,
    // Serializes flushes so concurrent writers cannot interleave renames.
    flush_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing file is an empty store. A file that is not a JSON object
    /// of strings is logged and treated as empty; it is replaced on the
    /// next write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let entries = DashMap::new();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(map) => {
                    tracing::info!(path = %path.display(), keys = map.len(), "Opened key-value store");
                    for (key, value) in map {
                        entries.insert(key, value);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Key-value store file is unreadable, starting empty"
                    );
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No key-value store file yet");
            }
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        }

        Ok(Self {
            path,
            entries,
            flush_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write every entry to disk.
    fn flush(&self) -> Result<(), AppError> {
        let _guard = self
            .flush_lock
            .lock()
            .map_err(|_| AppError::Storage("Flush lock poisoned".to_string()))?;

        let snapshot: BTreeMap<String, String> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        let contents = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| AppError::Storage(format!("Failed to encode store: {}", e)))?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, contents).map_err(|e| {
            AppError::Storage(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            AppError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // Keep memory in step with what is on disk.
            match previous {
                Some(old) => {
                    self.entries.insert(key.to_string(), old);
                }
                None => {
                    self.entries.remove(key);
                }
            }
            return Err(e);
        }
        tracing::debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }
}
