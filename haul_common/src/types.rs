//! Core data model (spec §3).
//!
//! Every struct here is `Copy` where the field set allows it — readers of
//! `DataHub` always get an owned value, never a borrow, so there is nothing
//! to tear under concurrent access.

use serde::{Deserialize, Serialize};

/// One sensor acquisition, raw or filtered depending on provenance.
///
/// `FaultMonitor` reads this straight from [`crate::ports::SensorPort`]
/// (the "raw" view); `SensorTask` publishes a filtered copy to the data hub
/// (the "snapshot" view). Same type, different producer — see SPEC_FULL §3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorFrame {
    /// Truck identifier.
    pub id: u8,
    /// Position, x metres.
    pub x: f64,
    /// Position, y metres.
    pub y: f64,
    /// Heading, degrees, normalised into `[0, 360)`.
    pub heading: f64,
    /// Speed, m/s.
    pub speed: f64,
    /// Engine temperature, degrees C.
    pub engine_temp_c: i32,
    /// Forward lidar distance, metres (capped, see `LIDAR_RANGE_CAP_M`).
    pub lidar_m: f64,
    /// Electrical subsystem fault bit.
    pub electrical_fault: bool,
    /// Hydraulic subsystem fault bit.
    pub hydraulic_fault: bool,
}

impl SensorFrame {
    /// The all-zero frame `readSnapshot` returns before any publish.
    pub const fn zero() -> Self {
        Self {
            id: 0,
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            speed: 0.0,
            engine_temp_c: 0,
            lidar_m: 0.0,
            electrical_fault: false,
            hydraulic_fault: false,
        }
    }
}

impl Default for SensorFrame {
    fn default() -> Self {
        Self::zero()
    }
}

/// The view `FaultMonitor` reads: straight off `SensorPort`, no EMA applied.
/// Same struct as [`SensorFrame`] (SPEC_FULL §3) — the alias exists purely
/// to name the provenance distinction spec §4.3 relies on ("reads raw
/// sensor state directly from the driver, bypassing any filtering").
pub type RawSensorFrame = SensorFrame;

/// Authoritative vehicle state, mutated only by `CommandLogic`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleState {
    /// True whenever a fault is latched (spec §3 invariant).
    pub fault: bool,
    /// True in automatic (waypoint-following) mode, false in manual.
    pub automatic: bool,
}

/// Operator input frame, written by the cockpit/transport adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorCommand {
    pub request_automatic: bool,
    pub request_manual: bool,
    pub rearm: bool,
    pub accelerate: bool,
    pub steer_right: bool,
    pub steer_left: bool,
}

/// Actuator command, written by `NavigationController` or CAS override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActuatorCommand {
    /// Throttle percent, `[-100, 100]`.
    pub throttle_pct: i32,
    /// Heading command degrees, `[0, 359]`.
    pub heading_deg: i32,
}

/// Active navigation target, published by `RoutePlanner`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationObjective {
    /// False implies "no target" — controller must brake and hold heading.
    pub active: bool,
    pub target_x: f64,
    pub target_y: f64,
    /// Reference speed for this leg, m/s. `0` means "stop here".
    pub reference_speed: f64,
}

/// One entry in `RoutePlanner`'s internal ordered queue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    /// Reference speed, m/s. `0` means "stop at this point".
    pub speed: f64,
}

/// Fault code latched by a monitor (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultCode {
    Thermal = 1,
    Electrical = 2,
    Hydraulic = 3,
    Obstacle = 4,
    External = 99,
}

impl FaultCode {
    /// Numeric code as carried on the wire / in `FaultLatch`.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// The fault latch's observable state: active bit + code.
///
/// Set by monitors via `Events::signal`, cleared only by `CommandLogic` on
/// operator rearm (spec §4.3, §8 round-trip property).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultLatch {
    pub active: bool,
    /// `0` when inactive; otherwise one of `FaultCode`'s numeric values.
    pub code: u8,
}

/// A mission message as delivered by `RoutePort::poll_new_route` (spec §6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMessage {
    pub route: Vec<Waypoint>,
}
