//! Error taxonomy (spec §7, SPEC_FULL §7).
//!
//! Modeled on `evo_common::hal::driver::HalError` / `evo_common::config::ConfigError`:
//! plain enums with `#[error(...)]` messages, no backtraces, cheap to clone
//! and log. None of these are raised for latched faults — those live in
//! [`crate::types::FaultLatch`], a state machine, not a `Result`.

use thiserror::Error;

/// Transient failures talking to a `SensorPort` / `ActuatorPort` implementor.
///
/// Workers catch this, keep their last good snapshot, and retry on the next
/// tick (spec §7: "Transient driver I/O").
#[derive(Debug, Clone, Error)]
pub enum DriverError {
    #[error("sensor read failed for truck {truck_id}: {reason}")]
    SensorRead { truck_id: u8, reason: String },

    #[error("actuator write failed: throttle={throttle_pct} heading={heading_deg}: {reason}")]
    ActuatorWrite {
        throttle_pct: i32,
        heading_deg: i32,
        reason: String,
    },

    #[error("system-state publish failed: {0}")]
    PublishFailed(String),
}

/// Mission (route message) parsing/validation failures (spec §7).
///
/// The planner logs these and continues with its prior plan; the queue is
/// left untouched.
#[derive(Debug, Clone, Error)]
pub enum MissionError {
    #[error("route message parse error: {0}")]
    Parse(String),

    #[error("waypoint speed must be >= 0, got {0}")]
    NegativeSpeed(f64),
}

/// `TruckConfig` loading failures.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
