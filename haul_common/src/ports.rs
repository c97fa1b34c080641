//! External collaborator interfaces (spec §2, §6, §9).
//!
//! Modeled on `evo_common::hal::driver::HalDriver`: a thin `Send + Sync`
//! trait object capability, so the orchestrator can wire a physics
//! simulator or a wire-protocol driver interchangeably (spec §9, "dynamic
//! polymorphism over drivers"). Only the core-facing surface is specified
//! here; concrete drivers (simulation, real hardware, transport adapters)
//! are external collaborators per spec §1/§2.

use crate::error::DriverError;
use crate::types::{RouteMessage, SensorFrame};

/// Capability to read sensor frames for a given truck.
///
/// Implementors bypass any core-side filtering: this is what `FaultMonitor`
/// calls directly (spec §4.3) and what `SensorTask` calls before applying
/// its own EMA (spec §4.2).
pub trait SensorPort: Send + Sync {
    /// Read one sensor frame for `truck_id`.
    ///
    /// An out-of-range `truck_id` is a contract violation (spec §7): return
    /// `Ok(SensorFrame::zero())` rather than an error, so FaultMonitor's
    /// thresholds still see a well-formed (if inert) frame.
    fn read_sensor_data(&self, truck_id: u8) -> Result<SensorFrame, DriverError>;
}

/// Capability to drive the truck's two actuator channels and optionally
/// report system state to external observers.
pub trait ActuatorPort: Send + Sync {
    /// Command throttle (`[-100, 100]` %) and heading (`[0, 359]` deg).
    fn set_actuators(&self, throttle_pct: i32, heading_deg: i32) -> Result<(), DriverError>;

    /// Optional telemetry hook: manual/auto mode and current fault state.
    /// Default no-op — not every actuator driver has a publish channel.
    fn publish_system_state(&self, _manual: bool, _fault: bool) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Capability to poll for a freshly-arrived mission.
///
/// `Ok(None)` means "no new route this tick" (the common case); `Ok(Some(_))`
/// replaces the planner's queue wholesale (spec §4.6).
pub trait RoutePort: Send + Sync {
    fn poll_new_route(&self) -> Result<Option<RouteMessage>, DriverError>;
}

/// Capability to persist sensor frames drained from `DataHub`'s blocking
/// history stream (spec §4.1 `consumeSensor`, §1 "telemetry logger").
///
/// The telemetry logger itself is an external collaborator (spec §1,
/// out of scope beyond this interface); this is the seam a real logging
/// process would sit behind.
pub trait TelemetrySink: Send + Sync {
    fn record(&self, frame: SensorFrame);
}
