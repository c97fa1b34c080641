//! Actuation gateway (spec §4.8, §5 shutdown).
//!
//! The only component permitted to call `ActuatorPort::set_actuators` in
//! normal operation — CAS is the sole exception, and it bypasses this
//! gateway entirely by writing directly through the driver (spec §4.4).
//! Drains `DataHub.actuator` at the control rate and forwards it, then
//! reports `manual`/`fault` via `publish_system_state`. On shutdown it
//! writes a final neutral command and reports `fault = true` so downstream
//! observers see that control has relinquished (spec §5).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::warn;

use haul_common::ports::ActuatorPort;

use crate::cycle::Ticker;
use crate::hub::DataHub;

/// Runs the actuation gateway until `run_flag` is cleared, then performs
/// the shutdown handshake (spec §5).
pub fn run(hub: Arc<DataHub>, driver: Arc<dyn ActuatorPort>, period: Duration, run_flag: Arc<AtomicBool>) {
    let mut ticker = Ticker::new(period);

    while run_flag.load(Ordering::Relaxed) {
        let cmd = hub.get_actuator();
        if let Err(e) = driver.set_actuators(cmd.throttle_pct, cmd.heading_deg) {
            warn!(error = %e, "gateway: actuator write failed");
        }

        let state = hub.get_state();
        if let Err(e) = driver.publish_system_state(!state.automatic, state.fault) {
            warn!(error = %e, "gateway: system-state publish failed");
        }

        ticker.wait_next();
    }

    // Shutdown handshake: relinquish control cleanly.
    let current_heading = hub.read_snapshot().heading as i32;
    let _ = driver.set_actuators(0, current_heading);
    let _ = driver.publish_system_state(true, true);
}
