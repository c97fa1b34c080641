//! FaultMonitor — the watchdog task (spec §4.3).
//!
//! Reads raw sensor state directly from the driver, bypassing `DataHub`'s
//! filtered snapshot, so safety thresholds are never masked by `SensorTask`'s
//! EMA. Performs no recovery: clearing the latch is `CommandLogic`'s
//! exclusive responsibility on operator rearm.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use haul_common::ports::SensorPort;
use haul_common::types::{FaultCode, RawSensorFrame};

use crate::cycle::Ticker;
use crate::events::Events;

/// Thresholds FaultMonitor evaluates against the raw sensor frame.
#[derive(Debug, Clone, Copy)]
pub struct FaultThresholds {
    /// Latch code 1 above this temperature.
    pub temp_fault_c: i32,
}

/// Evaluate one raw frame against the thresholds and latch through `events`
/// if warranted (spec §4.3). Pure function, exercised directly by tests;
/// [`run`] wraps it in the periodic loop.
pub fn evaluate(events: &Events, thresholds: &FaultThresholds, frame: RawSensorFrame) {
    if frame.engine_temp_c > thresholds.temp_fault_c {
        events.signal(FaultCode::Thermal);
    }
    if frame.electrical_fault {
        events.signal(FaultCode::Electrical);
    }
    if frame.hydraulic_fault {
        events.signal(FaultCode::Hydraulic);
    }
}

/// Runs the fault monitoring task until `run_flag` is cleared.
pub fn run(
    events: Arc<Events>,
    driver: Arc<dyn SensorPort>,
    truck_id: u8,
    period: std::time::Duration,
    thresholds: FaultThresholds,
    run_flag: Arc<AtomicBool>,
) {
    let mut ticker = Ticker::new(period);
    while run_flag.load(Ordering::Relaxed) {
        match driver.read_sensor_data(truck_id) {
            Ok(frame) => evaluate(&events, &thresholds, frame),
            Err(e) => warn!(error = %e, "fault monitor: sensor read failed"),
        }
        ticker.wait_next();
    }
}
