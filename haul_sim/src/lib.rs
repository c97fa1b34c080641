//! Simulation driver: a test/demo double for the physics simulator and
//! transport driver the control plant normally talks to (spec §1, §9).
//!
//! # Module Structure
//!
//! - [`physics`] - bicycle-model kinematics + thermal model
//! - [`driver`] - `SimulationDriver`, implementing `SensorPort` /
//!   `ActuatorPort` / `RoutePort`
//! - [`route`] - `StaticRoutePort`, a file-backed `RoutePort` double

pub mod driver;
pub mod physics;
pub mod route;

pub use driver::SimulationDriver;
pub use route::StaticRoutePort;
