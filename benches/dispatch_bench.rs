//! Benchmarks for the elevator dispatcher.
//!
//! Benchmarks cover:
//! - Nearest-car ranking over fleets of different sizes
//! - Enqueue into a single car's bounded queue
//! - Status reads while cars are working
//! - End-to-end pickups with zero travel time

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;

use elevator_dispatch::config::FleetConfig;
use elevator_dispatch::core::{rank_by_distance, Car, CarParams, Controller, Request};
use elevator_dispatch::util::{CarId, Floor, FloorBounds};

// ============================================================================
// Helper Functions
// ============================================================================

fn positions(cars: usize) -> Vec<(CarId, Floor)> {
    (0..cars)
        .map(|id| (id, i32::try_from(id * 7 % 100).unwrap_or(0) + 1))
        .collect()
}

fn fast_controller(cars: usize, capacity: usize) -> Controller {
    Controller::new(
        FleetConfig::new(cars, capacity, FloorBounds::new(1, 100))
            .with_travel_time(Duration::ZERO)
            .with_completion_retention(100_000),
    )
    .unwrap()
}

// ============================================================================
// Ranking Benchmarks
// ============================================================================

fn bench_rank_by_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_by_distance");

    for cars in [4_usize, 16, 64, 256] {
        let fleet = positions(cars);
        group.bench_with_input(BenchmarkId::from_parameter(cars), &fleet, |b, fleet| {
            b.iter(|| black_box(rank_by_distance(black_box(50), fleet)));
        });
    }

    group.finish();
}

// ============================================================================
// Car Benchmarks
// ============================================================================

fn bench_car_enqueue(c: &mut Criterion) {
    let mut group = c.benchmark_group("car_enqueue");

    for size in [100_u64, 1_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                // Worker is held but never run, so the queue only fills.
                || Car::new(CarParams::new(0, size as usize, 1)).unwrap(),
                |(car, worker)| {
                    for id in 0..size {
                        car.enqueue(Request::new(id, 1, 2)).unwrap();
                    }
                    black_box((car.queue_length(), worker));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_status_reads(c: &mut Criterion) {
    let controller = Controller::new(
        FleetConfig::new(4, 16, FloorBounds::new(1, 100)).with_travel_time(Duration::from_millis(1)),
    )
    .unwrap();
    for i in 0..4 {
        let _ = controller.request_pickup(1 + i, 100 - i);
    }

    c.bench_function("fleet_status_while_moving", |b| {
        b.iter(|| black_box(controller.fleet_status()));
    });

    controller.shutdown();
}

// ============================================================================
// End-to-End Benchmarks
// ============================================================================

fn bench_pickup_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("pickup_round_trip");
    group.sample_size(20);

    for batch in [10_u64, 100] {
        let controller = fast_controller(4, batch as usize);
        group.throughput(Throughput::Elements(batch));
        group.bench_with_input(BenchmarkId::from_parameter(batch), &batch, |b, &batch| {
            b.iter(|| {
                for i in 0..batch {
                    let source = i32::try_from(i % 99).unwrap_or(0) + 1;
                    let _ = controller.request_pickup(source, source + 1);
                }
                black_box(controller.wait_until_idle(Duration::from_secs(10)));
            });
        });
        controller.shutdown();
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rank_by_distance,
    bench_car_enqueue,
    bench_status_reads,
    bench_pickup_round_trip
);
criterion_main!(benches);
