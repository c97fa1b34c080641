//! Operational constants shared by every core component (spec §6).
//!
//! These are the compile-time defaults. [`crate::config::TruckConfig`] lets
//! an operator override any of them from a TOML file; a component always
//! reads its tunables from the loaded config, falling back to these values
//! when a field is absent.

use std::time::Duration;

/// Bounded FIFO history length held by [`crate::hub`](../haul_core) `DataHub`.
pub const HISTORY_CAPACITY: usize = 200;

/// Distance at which [`RoutePlanner`](../haul_core) pops the head waypoint.
pub const ARRIVAL_RADIUS_M: f64 = 5.0;

/// Lidar range below which CAS engages the emergency brake.
pub const SAFE_DISTANCE_M: f64 = 10.0;

/// EMA window used for position/heading smoothing (`K = 2 / (N + 1)`).
pub const EMA_N: f64 = 10.0;

/// Pure-pursuit wheelbase [m].
pub const WHEELBASE_M: f64 = 6.0;

/// Pure-pursuit lookahead gain [s].
pub const LOOKAHEAD_K_S: f64 = 1.1;

/// Pure-pursuit minimum lookahead distance [m].
pub const LOOKAHEAD_MIN_M: f64 = 2.8;

/// Speed-loop proportional gain.
pub const KP_V: f64 = 20.0;

/// Speed-loop integral gain.
pub const KI_V: f64 = 20.0;

/// Control-loop fixed timestep [s], matches [`NAV_PERIOD`].
pub const DT_CONTROL_S: f64 = 0.1;

/// Engine temperature above which a warning (not a latch) applies.
pub const TEMP_WARN_C: i32 = 95;

/// Engine temperature above which FaultMonitor latches code 1 (thermal).
pub const TEMP_FAULT_C: i32 = 120;

/// Cornering slowdown starts once heading error exceeds this magnitude.
pub const CORNER_ERROR_START_DEG: f64 = 10.0;

/// Heading error magnitude at which cornering speed factor bottoms out at 0.
pub const CORNER_ERROR_FULL_DEG: f64 = 112.5;

/// Minimum commanded reference speed while cornering, as long as `v_ref > 0`.
pub const CORNER_MIN_SPEED_MPS: f64 = 2.0;

/// Lidar range cap standing in for "no obstacle" (glossary: "lidar distance").
pub const LIDAR_RANGE_CAP_M: f64 = 100.0;

/// Back-off throttle applied during the post-collision rearm maneuver.
pub const BACKOFF_THROTTLE_PCT: i32 = -50;

/// Duration of the post-collision back-off maneuver before the latch clears.
pub const BACKOFF_DURATION: Duration = Duration::from_secs(2);

// ─── Task periods (spec §5) ─────────────────────────────────────────

/// CAS: 20 Hz, the most urgent task in the plant.
pub const CAS_PERIOD: Duration = Duration::from_millis(50);
/// Actuation gateway: matches the controller rate.
pub const GATEWAY_PERIOD: Duration = Duration::from_millis(100);
/// NavigationController: physics control rate.
pub const NAV_PERIOD: Duration = Duration::from_millis(100);
/// SensorTask: acquisition rate.
pub const SENSOR_PERIOD: Duration = Duration::from_millis(100);
/// CommandLogic: supervisor rate.
pub const COMMAND_PERIOD: Duration = Duration::from_millis(100);
/// RoutePlanner: mission update rate.
pub const ROUTE_PERIOD: Duration = Duration::from_millis(100);
/// FaultMonitor: thermal dynamics are slow, 5 Hz is enough.
pub const FAULT_PERIOD: Duration = Duration::from_millis(200);

// These constants only make sense relative to each other; catch a typo'd
// edit here at compile time rather than in a test run.
static_assertions::const_assert!(TEMP_WARN_C < TEMP_FAULT_C);
static_assertions::const_assert!(CORNER_ERROR_START_DEG < CORNER_ERROR_FULL_DEG);
