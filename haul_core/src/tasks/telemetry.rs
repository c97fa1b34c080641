//! Telemetry logger hookup (spec §4.1 `consumeSensor`, §1 "telemetry
//! logger (external)").
//!
//! The telemetry logger process itself is an external collaborator, out of
//! scope beyond its interface (spec §1 Non-goals: "telemetry persistence
//! formats"). This task is the one in-process consumer of `DataHub`'s
//! blocking history stream, draining it and forwarding each frame to a
//! [`TelemetrySink`] — the seam a real logging process sits behind.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use haul_common::ports::TelemetrySink;

use crate::hub::DataHub;

/// How long [`DataHub::consume_sensor_timeout`] waits before re-checking
/// the shutdown run flag.
const POLL_TIMEOUT: Duration = Duration::from_millis(200);

/// Runs the telemetry consumer until `run_flag` is cleared, draining every
/// frame `DataHub::publish_sensor` has appended to the history stream.
pub fn run(hub: Arc<DataHub>, sink: Arc<dyn TelemetrySink>, run_flag: Arc<AtomicBool>) {
    while run_flag.load(Ordering::Relaxed) {
        if let Some(frame) = hub.consume_sensor_timeout(POLL_TIMEOUT) {
            sink.record(frame);
        }
    }
}

/// A minimal [`TelemetrySink`] that logs each frame via `tracing`, standing
/// in for a real telemetry-persistence process (spec §1 Non-goals:
/// "telemetry persistence formats" are out of scope, the hook is not).
#[derive(Debug, Default)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, frame: haul_common::types::SensorFrame) {
        tracing::debug!(
            id = frame.id,
            x = frame.x,
            y = frame.y,
            heading = frame.heading,
            speed = frame.speed,
            engine_temp_c = frame.engine_temp_c,
            "telemetry frame"
        );
    }
}
