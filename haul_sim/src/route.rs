//! `StaticRoutePort` — a file-backed `RoutePort` (SPEC_FULL §1, §9).
//!
//! A minimal test/demo double distinct from [`crate::driver::SimulationDriver`]'s
//! own `RoutePort` implementation: rather than an in-memory `inject_route`
//! hook, this one parses a mission JSON file once at construction and
//! delivers it exactly one time, the way a one-shot file-backed mission
//! loader would. Parse failures are spec §7's "Invalid mission" case:
//! logged at `warn`, the port simply has nothing to deliver rather than
//! propagating an error to `RoutePlanner` (which must continue with its
//! prior plan untouched).

use std::path::Path;
use std::sync::Mutex;

use tracing::warn;

use haul_common::error::{DriverError, MissionError};
use haul_common::ports::RoutePort;
use haul_common::types::RouteMessage;

pub struct StaticRoutePort {
    pending: Mutex<Option<RouteMessage>>,
}

impl StaticRoutePort {
    /// Read and parse `path` as a `{"route": [...]}` mission file. On any
    /// failure (missing file, malformed JSON, negative waypoint speed),
    /// logs the reason and starts with nothing pending — the planner
    /// it feeds simply sees no route message this run, matching spec §7.
    pub fn from_file(path: &Path) -> Self {
        Self {
            pending: Mutex::new(Self::load(path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "mission file rejected");
                None
            })),
        }
    }

    /// A port with a route already in hand, for tests that don't want to
    /// touch the filesystem.
    pub fn with_route(route: RouteMessage) -> Self {
        Self {
            pending: Mutex::new(Some(route)),
        }
    }

    fn load(path: &Path) -> Result<Option<RouteMessage>, MissionError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| MissionError::Parse(format!("{}: {e}", path.display())))?;
        let route: RouteMessage =
            serde_json::from_str(&text).map_err(|e| MissionError::Parse(e.to_string()))?;
        for wp in &route.route {
            if wp.speed < 0.0 {
                return Err(MissionError::NegativeSpeed(wp.speed));
            }
        }
        Ok(Some(route))
    }
}

impl RoutePort for StaticRoutePort {
    fn poll_new_route(&self) -> Result<Option<RouteMessage>, DriverError> {
        Ok(self.pending.lock().unwrap().take())
    }
}
