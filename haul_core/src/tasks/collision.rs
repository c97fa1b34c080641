//! CollisionAvoidance (CAS) — the highest-priority safety kernel (spec §4.4).
//!
//! Reads the `DataHub` snapshot (not the raw driver — the obstacle range is
//! already published by `SensorTask` at the time CAS runs, and spec §4.4
//! only requires CAS to react to the lidar channel, which `SensorTask`
//! passes through unfiltered). On a breach it writes the emergency brake
//! directly through the actuator driver, bypassing the controller's queued
//! command entirely, and latches fault code 4. CAS never clears the latch.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use haul_common::ports::ActuatorPort;
use haul_common::types::FaultCode;

use crate::cycle::Ticker;
use crate::events::Events;
use crate::hub::DataHub;

/// Evaluate one snapshot and, if the obstacle range is breached, write the
/// emergency brake and latch code 4. Returns whether CAS engaged this tick.
pub fn evaluate(
    hub: &DataHub,
    events: &Events,
    driver: &dyn ActuatorPort,
    safe_distance_m: f64,
) -> bool {
    let frame = hub.read_snapshot();
    if frame.lidar_m >= safe_distance_m {
        return false;
    }

    if let Err(e) = driver.set_actuators(-100, frame.heading as i32) {
        warn!(error = %e, "CAS: emergency brake write failed");
    }
    events.signal(FaultCode::Obstacle);
    true
}

/// Runs the collision-avoidance task until `run_flag` is cleared.
pub fn run(
    hub: Arc<DataHub>,
    events: Arc<Events>,
    driver: Arc<dyn ActuatorPort>,
    period: std::time::Duration,
    safe_distance_m: f64,
    run_flag: Arc<AtomicBool>,
) {
    let mut ticker = Ticker::new(period);
    while run_flag.load(Ordering::Relaxed) {
        evaluate(&hub, &events, driver.as_ref(), safe_distance_m);
        ticker.wait_next();
    }
}
