//! The six periodic tasks plus the actuation gateway (spec §4.2–§4.8).

pub mod collision;
pub mod command_logic;
pub mod fault_monitor;
pub mod gateway;
pub mod nav_controller;
pub mod route_planner;
pub mod sensor;
pub mod telemetry;
