//! Nearest-car selection.
//!
//! Cars are ranked by absolute distance between their published floor and the
//! pickup floor, ties broken by lowest car id. The ranking reads a snapshot, so
//! it is advisory: a car may move between the snapshot and the enqueue. Car
//! direction and in-flight destinations are ignored, which can pick a car that
//! is about to travel away from the pickup.

use crate::util::serde::{CarId, Floor};

/// Order cars by distance to `source_floor`, nearest first, lower id on ties.
///
/// `positions` holds one `(car_id, published_floor)` entry per car.
#[must_use]
pub fn rank_by_distance(source_floor: Floor, positions: &[(CarId, Floor)]) -> Vec<CarId> {
    let mut ranked: Vec<(u32, CarId)> = positions
        .iter()
        .map(|&(car_id, floor)| (source_floor.abs_diff(floor), car_id))
        .collect();
    ranked.sort_unstable();
    ranked.into_iter().map(|(_, car_id)| car_id).collect()
}
