// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout snapshot persistence.
//!
//! The whole ordered collection is written under one key after every
//! accepted workout. Loading matches on each record's `kind` and rebuilds
//! the workout through [`Workout::new`], so reloaded workouts carry the
//! same derived metrics and description as freshly recorded ones.

use std::collections::HashSet;
use std::sync::Arc;

use crate::db::KeyValueStore;
use crate::error::{AppError, Result};
use crate::models::{RideInput, RunInput, Workout, WorkoutInput, WorkoutRecord};
use crate::services::validator;

/// Reads and writes the workout snapshot.
#[derive(Clone)]
pub struct PersistenceAdapter {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl PersistenceAdapter {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrite the stored snapshot with `workouts`, in iteration order.
    pub fn save<'a, I>(&self, workouts: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Workout>,
    {
        let encoded = encode_snapshot(workouts)?;
        self.kv.set(&self.key, &encoded)?;
        tracing::debug!(key = %self.key, bytes = encoded.len(), "Saved workout snapshot");
        Ok(())
    }

    /// Read the stored snapshot.
    ///
    /// A missing, unreadable or malformed snapshot yields an empty list:
    /// stored history is optional, so none of those conditions are errors.
    pub fn load(&self) -> Vec<Workout> {
        match self.try_load() {
            Ok(workouts) => workouts,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding stored workouts");
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<Workout>> {
        let Some(raw) = self.kv.get(&self.key)? else {
            tracing::info!(key = %self.key, "No stored workouts");
            return Ok(Vec::new());
        };

        let workouts = decode_snapshot(&raw)?;
        tracing::info!(key = %self.key, count = workouts.len(), "Loaded stored workouts");
        Ok(workouts)
    }
}

/// Serialize workouts as a JSON array of records.
pub fn encode_snapshot<'a, I>(workouts: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Workout>,
{
    let records: Vec<WorkoutRecord> = workouts.into_iter().map(WorkoutRecord::from).collect();
    serde_json::to_string(&records)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode snapshot: {}", e)))
}

/// Parse a snapshot and rebuild each workout.
///
/// Fails with [`AppError::CorruptPersistedData`] if any record is malformed,
/// has out-of-range values, or repeats an earlier id.
pub fn decode_snapshot(raw: &str) -> Result<Vec<Workout>> {
    let records: Vec<WorkoutRecord> = serde_json::from_str(raw)
        .map_err(|e| AppError::CorruptPersistedData(format!("Invalid snapshot: {}", e)))?;

    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .map(|record| {
            if !seen.insert(record.id().clone()) {
                return Err(AppError::CorruptPersistedData(format!(
                    "Duplicate workout id {}",
                    record.id()
                )));
            }
            rebuild(record)
        })
        .collect()
}

fn rebuild(record: WorkoutRecord) -> Result<Workout> {
    let (id, created_at, coordinates, input) = match record {
        WorkoutRecord::Running(run) => (
            run.id,
            run.created_at,
            run.coordinates,
            WorkoutInput::Run(RunInput {
                distance_km: run.distance_km,
                duration_min: run.duration_min,
                cadence_spm: run.cadence_spm,
            }),
        ),
        WorkoutRecord::Cycling(ride) => (
            ride.id,
            ride.created_at,
            ride.coordinates,
            WorkoutInput::Ride(RideInput {
                distance_km: ride.distance_km,
                duration_min: ride.duration_min,
                elevation_gain_m: ride.elevation_gain_m,
            }),
        ),
    };

    if !coordinates.is_valid() {
        return Err(AppError::CorruptPersistedData(format!(
            "Workout {} has invalid coordinates",
            id
        )));
    }
    validator::check(&input).map_err(|_| {
        AppError::CorruptPersistedData(format!("Workout {} has invalid metrics", id))
    })?;

    Ok(Workout::new(id, created_at, coordinates, input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{Coordinates, WorkoutId, WorkoutKind};
    use chrono::{TimeZone, Utc};

    fn sample_workouts() -> Vec<Workout> {
        let t = Utc.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap();
        vec![
            Workout::new(
                WorkoutId::new("1713087000000"),
                t,
                Coordinates::new(51.5, -0.1),
                WorkoutInput::Run(RunInput {
                    distance_km: 5.0,
                    duration_min: 30.0,
                    cadence_spm: 160,
                }),
            ),
            Workout::new(
                WorkoutId::new("1713087000001"),
                t,
                Coordinates::new(48.85, 2.35),
                WorkoutInput::Ride(RideInput {
                    distance_km: 27.0,
                    duration_min: 95.0,
                    elevation_gain_m: 523.0,
                }),
            ),
        ]
    }

    fn adapter_with(raw: Option<&str>) -> PersistenceAdapter {
        let kv = Arc::new(MemoryStore::new());
        if let Some(raw) = raw {
            kv.set("workouts", raw).unwrap();
        }
        PersistenceAdapter::new(kv, "workouts")
    }

    #[test]
    fn test_round_trip_restores_variant_behavior() {
        let originals = sample_workouts();
        let adapter = adapter_with(None);

        adapter.save(&originals).unwrap();
        let loaded = adapter.load();

        assert_eq!(loaded.len(), originals.len());
        for (original, reloaded) in originals.iter().zip(&loaded) {
            assert_eq!(reloaded.id(), original.id());
            assert_eq!(reloaded.kind(), original.kind());
            assert_eq!(reloaded.pace_min_per_km(), original.pace_min_per_km());
            assert_eq!(reloaded.speed_kmh(), original.speed_kmh());
            assert_eq!(reloaded.description(), original.description());
            assert_eq!(reloaded, original);
        }
        assert_eq!(loaded[0].kind(), WorkoutKind::Running);
        assert_eq!(loaded[0].pace_min_per_km(), Some(6.0));
        assert_eq!(loaded[1].kind(), WorkoutKind::Cycling);
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let workouts = sample_workouts();
        let adapter = adapter_with(None);

        adapter.save(&workouts).unwrap();
        adapter.save(&workouts[..1]).unwrap();

        assert_eq!(adapter.load().len(), 1);
    }

    #[test]
    fn test_snapshot_omits_derived_fields() {
        let encoded = encode_snapshot(&sample_workouts()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value[0]["kind"], "running");
        assert_eq!(value[1]["kind"], "cycling");
        assert!(value[0].get("pace").is_none());
        assert!(value[0].get("description").is_none());
    }

    #[test]
    fn test_missing_snapshot_loads_empty() {
        assert!(adapter_with(None).load().is_empty());
    }

    #[test]
    fn test_unparseable_snapshot_loads_empty() {
        assert!(adapter_with(Some("{not json")).load().is_empty());
        assert!(adapter_with(Some(r#"{"kind":"running"}"#)).load().is_empty());
    }

    #[test]
    fn test_invalid_values_are_corrupt() {
        let raw = r#"[{"kind":"running","id":"1","coordinates":[51.5,-0.1],
            "distanceKm":-5,"durationMin":30,"createdAt":"2024-04-14T09:30:00Z","cadenceSpm":160}]"#;
        assert!(matches!(
            decode_snapshot(raw),
            Err(AppError::CorruptPersistedData(_))
        ));

        let raw = r#"[{"kind":"cycling","id":"1","coordinates":[151.5,-0.1],
            "distanceKm":5,"durationMin":30,"createdAt":"2024-04-14T09:30:00Z","elevationGainM":0}]"#;
        assert!(matches!(
            decode_snapshot(raw),
            Err(AppError::CorruptPersistedData(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_are_corrupt() {
        let mut workouts = sample_workouts();
        workouts.push(workouts[0].clone());
        let encoded = encode_snapshot(&workouts).unwrap();

        assert!(matches!(
            decode_snapshot(&encoded),
            Err(AppError::CorruptPersistedData(_))
        ));
        assert!(adapter_with(Some(&encoded)).load().is_empty());
    }
}
