//! Demo: start a fleet from the environment and issue the sample pickups.
//!
//! ```text
//! RUST_LOG=elevator_dispatch=debug ELEVATOR_TRAVEL_MS=200 cargo run --bin elevator_demo
//! ```

use std::time::Duration;

use anyhow::Context;
use elevator_dispatch::builders::ControllerBuilder;
use elevator_dispatch::core::AppResult;
use elevator_dispatch::runtime::fleet_snapshot;
use elevator_dispatch::util::init_tracing_with_default;
use tracing::info;

const SAMPLE_PICKUPS: [(i32, i32); 4] = [(5, 10), (3, 7), (8, 2), (1, 9)];

fn main() -> AppResult<()> {
    init_tracing_with_default("elevator_dispatch=info");

    let controller = ControllerBuilder::from_env()
        .context("loading fleet configuration")?
        .build()
        .context("starting elevator fleet")?;

    let mut ids = Vec::with_capacity(SAMPLE_PICKUPS.len());
    for (source, destination) in SAMPLE_PICKUPS {
        let id = controller
            .request_pickup(source, destination)
            .with_context(|| format!("pickup {source} -> {destination}"))?;
        info!(request_id = id, source, destination, "pickup requested");
        ids.push(id);
    }

    let floors = controller.config().floor_bounds.span();
    let budget = controller
        .config()
        .travel_time()
        .checked_mul(floors.saturating_mul(4))
        .unwrap_or(Duration::MAX)
        .saturating_add(Duration::from_secs(1));
    for id in ids {
        let trip = controller
            .await_completion(id, budget)
            .with_context(|| format!("waiting for request {id}"))?;
        info!(
            request_id = id,
            car_id = trip.car_id,
            floor = trip.final_floor,
            floors_travelled = trip.floors_travelled,
            "trip complete"
        );
    }

    let snapshot = fleet_snapshot(&controller);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    controller.shutdown();
    Ok(())
}
