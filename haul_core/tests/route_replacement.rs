//! Scenario 6 (spec §8): route replacement.
//!
//! Under an active three-waypoint route, just past the first waypoint, a
//! new single-waypoint route arrives. The planner must discard the
//! remaining waypoints and track the new one within one tick.

use haul_common::types::{SensorFrame, Waypoint};
use haul_core::tasks::route_planner::RoutePlanner;

fn pos(x: f64, y: f64) -> SensorFrame {
    SensorFrame {
        x,
        y,
        ..SensorFrame::zero()
    }
}

#[test]
fn new_route_discards_remaining_waypoints_within_one_tick() {
    let mut planner = RoutePlanner::new(5.0);
    planner.replace_route(vec![
        Waypoint { x: 0.0, y: 0.0, speed: 20.0 },
        Waypoint { x: 50.0, y: 0.0, speed: 20.0 },
        Waypoint { x: 100.0, y: 0.0, speed: 20.0 },
    ]);

    // Arrive at waypoint 1; head becomes waypoint 2.
    let obj = planner.tick(pos(0.0, 0.0));
    assert_eq!(obj.target_x, 50.0);
    assert_eq!(planner.queue_len(), 2);

    // A new route arrives mid-mission.
    planner.replace_route(vec![Waypoint {
        x: 200.0,
        y: 200.0,
        speed: 8.0,
    }]);
    assert_eq!(planner.queue_len(), 1);

    let obj = planner.tick(pos(0.0, 0.0));
    assert!(obj.active);
    assert_eq!(obj.target_x, 200.0);
    assert_eq!(obj.target_y, 200.0);
    assert_eq!(obj.reference_speed, 8.0);
}
