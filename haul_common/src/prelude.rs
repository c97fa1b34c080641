//! Common re-exports, analogous to `evo_common::prelude`.

pub use crate::config::TruckConfig;
pub use crate::consts;
pub use crate::error::{ConfigError, DriverError, MissionError};
pub use crate::heading::{normalise360, normalise_signed};
pub use crate::ports::{ActuatorPort, RoutePort, SensorPort, TelemetrySink};
pub use crate::types::{
    ActuatorCommand, FaultCode, FaultLatch, NavigationObjective, OperatorCommand, RawSensorFrame,
    RouteMessage, SensorFrame, VehicleState, Waypoint,
};
