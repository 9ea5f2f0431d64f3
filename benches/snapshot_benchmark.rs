use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use workout_tracker::models::{Coordinates, RideInput, RunInput, Workout, WorkoutId, WorkoutInput};
use workout_tracker::services::persistence::{decode_snapshot, encode_snapshot};

const WORKOUT_COUNT: usize = 1000;

fn build_workouts() -> Vec<Workout> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();

    (0..WORKOUT_COUNT)
        .map(|i| {
            let input = if i % 2 == 0 {
                WorkoutInput::Run(RunInput {
                    distance_km: 5.0 + (i % 10) as f64,
                    duration_min: 25.0 + (i % 30) as f64,
                    cadence_spm: 150 + (i % 30) as u32,
                })
            } else {
                WorkoutInput::Ride(RideInput {
                    distance_km: 20.0 + (i % 50) as f64,
                    duration_min: 45.0 + (i % 60) as f64,
                    elevation_gain_m: (i % 800) as f64,
                })
            };
            Workout::new(
                WorkoutId::new((1_704_092_400_000 + i as u64).to_string()),
                start + Duration::hours(i as i64),
                Coordinates::new(51.5 + (i as f64) * 1e-4, -0.1),
                input,
            )
        })
        .collect()
}

fn benchmark_snapshot(c: &mut Criterion) {
    let workouts = build_workouts();
    let encoded = encode_snapshot(&workouts).expect("Failed to encode snapshot");

    let mut group = c.benchmark_group("workout_snapshot");

    group.bench_function("encode_1000", |b| {
        b.iter(|| encode_snapshot(black_box(&workouts)))
    });

    group.bench_function("decode_1000", |b| {
        b.iter(|| decode_snapshot(black_box(&encoded)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_snapshot);
criterion_main!(benches);
