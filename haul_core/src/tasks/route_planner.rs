//! RoutePlanner (spec §4.6).
//!
//! Maintains an ordered queue of waypoints, replacing it wholesale whenever
//! a new route message arrives, and publishes the active `NavigationObjective`
//! derived from the queue head and the current position snapshot.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{info, warn};

use haul_common::ports::RoutePort;
use haul_common::types::{NavigationObjective, SensorFrame, Waypoint};

use crate::cycle::Ticker;
use crate::hub::DataHub;

/// Internal queue plus the per-tick decision logic (spec §4.6 steps 1-3).
pub struct RoutePlanner {
    queue: VecDeque<Waypoint>,
    arrival_radius_m: f64,
}

impl RoutePlanner {
    pub fn new(arrival_radius_m: f64) -> Self {
        Self {
            queue: VecDeque::new(),
            arrival_radius_m,
        }
    }

    /// Replace the queue wholesale with a freshly-arrived route (step 1).
    pub fn replace_route(&mut self, waypoints: Vec<Waypoint>) {
        self.queue = waypoints.into();
    }

    /// Compute this tick's objective from the current position, popping the
    /// head waypoint if it has been reached (steps 2-3).
    pub fn tick(&mut self, position: SensorFrame) -> NavigationObjective {
        if self.queue.is_empty() {
            return NavigationObjective::default();
        }

        let head = *self.queue.front().expect("checked non-empty above");
        let dx = head.x - position.x;
        let dy = head.y - position.y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance < self.arrival_radius_m {
            self.queue.pop_front();
            match self.queue.front() {
                None => NavigationObjective::default(),
                Some(next) => NavigationObjective {
                    active: true,
                    target_x: next.x,
                    target_y: next.y,
                    reference_speed: next.speed,
                },
            }
        } else {
            NavigationObjective {
                active: true,
                target_x: head.x,
                target_y: head.y,
                reference_speed: head.speed,
            }
        }
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }
}

/// Runs the route-planning task until `run_flag` is cleared.
pub fn run(
    hub: Arc<DataHub>,
    route_port: Arc<dyn RoutePort>,
    period: Duration,
    arrival_radius_m: f64,
    run_flag: Arc<AtomicBool>,
) {
    let mut planner = RoutePlanner::new(arrival_radius_m);
    let mut ticker = Ticker::new(period);

    while run_flag.load(Ordering::Relaxed) {
        match route_port.poll_new_route() {
            Ok(Some(msg)) => {
                info!(waypoints = msg.route.len(), "route planner: new route received");
                planner.replace_route(msg.route);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "route planner: mission poll failed, keeping prior plan"),
        }

        let position = hub.read_snapshot();
        let objective = planner.tick(position);
        hub.set_objective(objective);
        ticker.wait_next();
    }
}
