//! `SimulationDriver` — the test/demo double for `SensorPort` / `ActuatorPort`
//! / `RoutePort` (spec §9 "dynamic polymorphism over drivers", SPEC_FULL
//! §2 "minimal `SimulationDriver`... not as a full physics engine").
//!
//! Grounded on `SimulationDriver` (`evo_hal/src/drivers/simulation/driver.rs`):
//! one struct implementing the core-facing capability traits, a single
//! mutex-guarded internal state advanced lazily on each sensor read rather
//! than by a background thread, and plain setter methods a test or demo
//! harness uses to inject faults, obstacles, or a mission, matching the
//! teacher's `set_position`/`set_referenced` style test hooks.

use std::sync::Mutex;
use std::time::Instant;

use tracing::debug;

use haul_common::error::DriverError;
use haul_common::ports::{ActuatorPort, RoutePort, SensorPort};
use haul_common::types::{RouteMessage, SensorFrame};

use crate::physics::TruckPhysics;

/// Lidar range reported in the absence of an injected obstacle.
const DEFAULT_LIDAR_M: f64 = haul_common::consts::LIDAR_RANGE_CAP_M;

struct SimCore {
    truck_id: u8,
    physics: TruckPhysics,
    throttle_cmd: i32,
    heading_cmd: i32,
    lidar_m: f64,
    electrical_fault: bool,
    hydraulic_fault: bool,
    last_update: Instant,
    pending_route: Option<RouteMessage>,
}

/// A single simulated truck, standing in for the physics simulator and the
/// transport driver both (spec §1: both are external collaborators, out of
/// scope beyond this minimal double).
pub struct SimulationDriver {
    core: Mutex<SimCore>,
}

impl SimulationDriver {
    /// Create a simulated truck at the origin, idle, with no obstacle and
    /// no pending mission.
    pub fn new(truck_id: u8) -> Self {
        Self::with_start_position(truck_id, 0.0, 0.0, 0.0)
    }

    /// Create a simulated truck at the given starting pose.
    pub fn with_start_position(truck_id: u8, x: f64, y: f64, heading_deg: f64) -> Self {
        Self {
            core: Mutex::new(SimCore {
                truck_id,
                physics: TruckPhysics::new(x, y, heading_deg, 25.0),
                throttle_cmd: 0,
                heading_cmd: 0,
                lidar_m: DEFAULT_LIDAR_M,
                electrical_fault: false,
                hydraulic_fault: false,
                last_update: Instant::now(),
                pending_route: None,
            }),
        }
    }

    /// Advance physics to "now" and return the raw frame, without consuming
    /// any pending route or resetting fault bits. Shared by `SensorPort`
    /// reads from both `SensorTask` and `FaultMonitor` (spec §4.3: the
    /// monitor reads the same raw driver state `SensorTask` does, just
    /// without the EMA applied downstream).
    fn advance_and_snapshot(core: &mut SimCore) -> SensorFrame {
        let now = Instant::now();
        let dt = now.duration_since(core.last_update).as_secs_f64();
        core.last_update = now;
        if dt > 0.0 {
            core.physics.step(dt, core.throttle_cmd, core.heading_cmd);
        }

        SensorFrame {
            id: core.truck_id,
            x: core.physics.x,
            y: core.physics.y,
            heading: core.physics.heading,
            speed: core.physics.speed,
            engine_temp_c: core.physics.temp_c.round() as i32,
            lidar_m: core.lidar_m,
            electrical_fault: core.electrical_fault,
            hydraulic_fault: core.hydraulic_fault,
        }
    }

    /// Test/demo hook: force the forward lidar reading (e.g. to simulate an
    /// obstacle for collision-avoidance scenarios).
    pub fn set_lidar(&self, distance_m: f64) {
        self.core.lock().unwrap().lidar_m = distance_m;
    }

    /// Test/demo hook: force the engine temperature directly, bypassing the
    /// thermal model (for fault-injection scenarios).
    pub fn set_temperature(&self, temp_c: i32) {
        self.core.lock().unwrap().physics.temp_c = temp_c as f64;
    }

    /// Test/demo hook: toggle the electrical fault bit.
    pub fn set_electrical_fault(&self, active: bool) {
        self.core.lock().unwrap().electrical_fault = active;
    }

    /// Test/demo hook: toggle the hydraulic fault bit.
    pub fn set_hydraulic_fault(&self, active: bool) {
        self.core.lock().unwrap().hydraulic_fault = active;
    }

    /// Test/demo hook: queue a mission for the next `poll_new_route` call.
    pub fn inject_route(&self, route: RouteMessage) {
        self.core.lock().unwrap().pending_route = Some(route);
    }

    /// Current pose, for assertions in end-to-end scenario tests.
    pub fn position(&self) -> (f64, f64) {
        let core = self.core.lock().unwrap();
        (core.physics.x, core.physics.y)
    }
}

impl SensorPort for SimulationDriver {
    fn read_sensor_data(&self, truck_id: u8) -> Result<SensorFrame, DriverError> {
        let mut core = self.core.lock().unwrap();
        if truck_id != core.truck_id {
            // Out-of-range id is a contract violation (spec §7): a zero
            // frame, not an `Err` — the fault monitor still evaluates its
            // thresholds against it rather than being starved of data.
            return Ok(SensorFrame::zero());
        }
        Ok(Self::advance_and_snapshot(&mut core))
    }
}

impl ActuatorPort for SimulationDriver {
    fn set_actuators(&self, throttle_pct: i32, heading_deg: i32) -> Result<(), DriverError> {
        let mut core = self.core.lock().unwrap();
        core.throttle_cmd = throttle_pct.clamp(-100, 100);
        core.heading_cmd = heading_deg.rem_euclid(360);
        Ok(())
    }

    fn publish_system_state(&self, manual: bool, fault: bool) -> Result<(), DriverError> {
        debug!(manual, fault, "simulation driver: system state published");
        Ok(())
    }
}

impl RoutePort for SimulationDriver {
    fn poll_new_route(&self) -> Result<Option<RouteMessage>, DriverError> {
        Ok(self.core.lock().unwrap().pending_route.take())
    }
}
