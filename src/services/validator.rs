// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout form validation.
//!
//! Raw form strings are parsed into finite numbers and then checked
//! against the range rules declared on [`RunInput`] / [`RideInput`].
//! Any failure is reported as a single [`AppError::InvalidInput`].

use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{RideInput, RunInput, WorkoutInput, WorkoutKind};

/// Raw field values of the workout form, exactly as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutForm {
    /// "running" or "cycling"
    #[serde(rename = "type")]
    pub kind: String,
    pub distance: String,
    pub duration: String,
    /// Only read for runs
    #[serde(default)]
    pub cadence: String,
    /// Only read for rides
    #[serde(default)]
    pub elevation: String,
}

/// Validate a submitted form.
pub fn validate_form(form: &WorkoutForm) -> Result<WorkoutInput> {
    let kind: WorkoutKind = form.kind.parse()?;
    let extra = match kind {
        WorkoutKind::Running => &form.cadence,
        WorkoutKind::Cycling => &form.elevation,
    };
    validate(kind, &form.distance, &form.duration, extra)
}

/// Validate raw distance, duration and the kind-specific value
/// (cadence for runs, elevation gain for rides).
pub fn validate(kind: WorkoutKind, distance: &str, duration: &str, extra: &str) -> Result<WorkoutInput> {
    let distance_km = parse_finite(distance).ok_or(AppError::InvalidInput)?;
    let duration_min = parse_finite(duration).ok_or(AppError::InvalidInput)?;

    let input = match kind {
        WorkoutKind::Running => WorkoutInput::Run(RunInput {
            distance_km,
            duration_min,
            cadence_spm: parse_cadence(extra).ok_or(AppError::InvalidInput)?,
        }),
        WorkoutKind::Cycling => WorkoutInput::Ride(RideInput {
            distance_km,
            duration_min,
            elevation_gain_m: parse_finite(extra).ok_or(AppError::InvalidInput)?,
        }),
    };

    check(&input)?;
    Ok(input)
}

/// Check already-parsed values against the numeric rules.
///
/// Used on form input and on records read back from storage.
pub fn check(input: &WorkoutInput) -> Result<()> {
    let outcome = match input {
        WorkoutInput::Run(run) => {
            if !(run.distance_km.is_finite() && run.duration_min.is_finite()) {
                return Err(AppError::InvalidInput);
            }
            run.validate()
        }
        WorkoutInput::Ride(ride) => {
            if !(ride.distance_km.is_finite()
                && ride.duration_min.is_finite()
                && ride.elevation_gain_m.is_finite())
            {
                return Err(AppError::InvalidInput);
            }
            ride.validate()
        }
    };

    outcome.map_err(|e| {
        tracing::debug!(kind = %input.kind(), errors = %e, "Workout input rejected");
        AppError::InvalidInput
    })
}

/// Parse a finite number; NaN, infinities and non-numeric text yield `None`.
fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Cadence must be a whole, non-negative number that fits in `u32`.
/// Zero is let through here and rejected by the range rule.
fn parse_cadence(raw: &str) -> Option<u32> {
    let value = parse_finite(raw)?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(distance: &str, duration: &str, cadence: &str) -> Result<WorkoutInput> {
        validate(WorkoutKind::Running, distance, duration, cadence)
    }

    fn ride(distance: &str, duration: &str, elevation: &str) -> Result<WorkoutInput> {
        validate(WorkoutKind::Cycling, distance, duration, elevation)
    }

    #[test]
    fn test_accepts_valid_run() {
        let input = run("5", "30", "150").unwrap();
        assert_eq!(
            input,
            WorkoutInput::Run(RunInput {
                distance_km: 5.0,
                duration_min: 30.0,
                cadence_spm: 150,
            })
        );
    }

    #[test]
    fn test_rejects_zero_distance() {
        assert!(matches!(run("0", "5", "5"), Err(AppError::InvalidInput)));
    }

    #[test]
    fn test_rejects_negative_cadence() {
        assert!(matches!(run("5", "5", "-1"), Err(AppError::InvalidInput)));
    }

    #[test]
    fn test_rejects_zero_cadence() {
        assert!(matches!(run("5", "30", "0"), Err(AppError::InvalidInput)));
    }

    #[test]
    fn test_rejects_fractional_cadence() {
        assert!(matches!(run("5", "30", "150.5"), Err(AppError::InvalidInput)));
    }

    #[test]
    fn test_rejects_non_numeric_and_non_finite() {
        for bad in ["abc", "", "  ", "NaN", "inf", "-infinity", "1e400"] {
            assert!(
                matches!(run(bad, "30", "150"), Err(AppError::InvalidInput)),
                "distance {:?} should be rejected",
                bad
            );
            assert!(
                matches!(ride("10", bad, "100"), Err(AppError::InvalidInput)),
                "duration {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_ride_elevation_may_be_zero_but_not_negative() {
        assert!(ride("20", "60", "0").is_ok());
        assert!(matches!(ride("20", "60", "-5"), Err(AppError::InvalidInput)));
    }

    #[test]
    fn test_ride_rejects_non_positive_duration() {
        assert!(matches!(ride("20", "0", "100"), Err(AppError::InvalidInput)));
        assert!(matches!(ride("20", "-30", "100"), Err(AppError::InvalidInput)));
    }

    #[test]
    fn test_validate_form_reads_kind_specific_field() {
        let form = WorkoutForm {
            kind: "cycling".to_string(),
            distance: "27".to_string(),
            duration: "95".to_string(),
            cadence: "not used".to_string(),
            elevation: "523".to_string(),
        };

        let input = validate_form(&form).unwrap();
        assert_eq!(
            input,
            WorkoutInput::Ride(RideInput {
                distance_km: 27.0,
                duration_min: 95.0,
                elevation_gain_m: 523.0,
            })
        );
    }

    #[test]
    fn test_validate_form_unknown_type() {
        let form = WorkoutForm {
            kind: "rowing".to_string(),
            distance: "5".to_string(),
            duration: "30".to_string(),
            ..Default::default()
        };

        assert!(matches!(validate_form(&form), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_check_rejects_nan_in_parsed_input() {
        let input = WorkoutInput::Ride(RideInput {
            distance_km: f64::NAN,
            duration_min: 10.0,
            elevation_gain_m: 0.0,
        });
        assert!(matches!(check(&input), Err(AppError::InvalidInput)));
    }
}
