//! Haul truck control plant: `DataHub`, `Events`, and the six periodic
//! tasks plus the actuation gateway (spec §2, §4).
//!
//! # Module Structure
//!
//! - [`hub`] - `DataHub`, the concurrency-safe central store (spec §4.1)
//! - [`events`] - `Events`, the fault latch (spec §4.3)
//! - [`cycle`] - drift-free periodic scheduling (spec §5)
//! - [`tasks`] - the six periodic tasks and the actuation gateway
//! - [`plant`] - wires the core and tasks into a running instance

pub mod cycle;
pub mod events;
pub mod hub;
pub mod plant;
pub mod tasks;
