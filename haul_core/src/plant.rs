//! Wires the shared core (`DataHub` + `Events`) to the six periodic tasks
//! and the actuation gateway, and owns their join handles and shutdown flag
//! (spec §5: "on shutdown signal, each worker observes a global run flag").
//!
//! This is the one place that decides which concrete `SensorPort` /
//! `ActuatorPort` / `RoutePort` to run against — spec §9's "orchestrator
//! decides which concrete driver to wire at startup".

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use haul_common::config::TruckConfig;
use haul_common::ports::{ActuatorPort, RoutePort, SensorPort, TelemetrySink};

use crate::events::Events;
use crate::hub::DataHub;
use crate::tasks::{
    collision, command_logic, fault_monitor, gateway, nav_controller, route_planner, sensor, telemetry,
};

/// A running instance of the control plant: the shared core plus all
/// worker threads.
pub struct Plant {
    pub hub: Arc<DataHub>,
    pub events: Arc<Events>,
    run_flag: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
}

impl Plant {
    /// Spawn every task as its own thread and begin running immediately.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn(
        config: &TruckConfig,
        sensor_driver: Arc<dyn SensorPort>,
        actuator_driver: Arc<dyn ActuatorPort>,
        route_driver: Arc<dyn RoutePort>,
        telemetry_sink: Arc<dyn TelemetrySink>,
    ) -> Self {
        let hub = DataHub::new(config.history_capacity);
        let events = Events::new();
        let run_flag = Arc::new(AtomicBool::new(true));

        let mut handles = Vec::new();

        {
            let hub = hub.clone();
            let driver = sensor_driver.clone();
            let truck_id = config.truck_id;
            let period = haul_common::consts::SENSOR_PERIOD;
            let ema_k = config.ema_k();
            let run_flag = run_flag.clone();
            handles.push(std::thread::spawn(move || {
                sensor::run(hub, driver, truck_id, period, ema_k, true, run_flag)
            }));
        }

        {
            let events = events.clone();
            let driver = sensor_driver.clone();
            let truck_id = config.truck_id;
            let period = haul_common::consts::FAULT_PERIOD;
            let thresholds = fault_monitor::FaultThresholds {
                temp_fault_c: config.temp_fault_c,
            };
            let run_flag = run_flag.clone();
            handles.push(std::thread::spawn(move || {
                fault_monitor::run(events, driver, truck_id, period, thresholds, run_flag)
            }));
        }

        {
            let hub = hub.clone();
            let events = events.clone();
            let driver = actuator_driver.clone();
            let period = haul_common::consts::CAS_PERIOD;
            let safe_distance = config.safe_distance_m;
            let run_flag = run_flag.clone();
            handles.push(std::thread::spawn(move || {
                collision::run(hub, events, driver, period, safe_distance, run_flag)
            }));
        }

        {
            let hub = hub.clone();
            let events = events.clone();
            let driver = actuator_driver.clone();
            let period = haul_common::consts::COMMAND_PERIOD;
            let backoff_duration = haul_common::consts::BACKOFF_DURATION;
            let backoff_throttle = haul_common::consts::BACKOFF_THROTTLE_PCT;
            let run_flag = run_flag.clone();
            handles.push(std::thread::spawn(move || {
                command_logic::run(
                    hub,
                    events,
                    driver,
                    period,
                    backoff_duration,
                    backoff_throttle,
                    run_flag,
                )
            }));
        }

        {
            let hub = hub.clone();
            let period = haul_common::consts::ROUTE_PERIOD;
            let arrival_radius = config.arrival_radius_m;
            let run_flag = run_flag.clone();
            handles.push(std::thread::spawn(move || {
                route_planner::run(hub, route_driver, period, arrival_radius, run_flag)
            }));
        }

        {
            let hub = hub.clone();
            let events = events.clone();
            let period = haul_common::consts::NAV_PERIOD;
            let gains = nav_controller::NavGains {
                wheelbase_m: config.wheelbase_m,
                lookahead_k_s: config.lookahead_k_s,
                lookahead_min_m: config.lookahead_min_m,
                kp_v: config.kp_v,
                ki_v: config.ki_v,
                dt_s: haul_common::consts::DT_CONTROL_S,
            };
            let run_flag = run_flag.clone();
            handles.push(std::thread::spawn(move || {
                run_nav_controller(hub, events, period, gains, run_flag)
            }));
        }

        {
            let hub = hub.clone();
            let driver = actuator_driver.clone();
            let period = haul_common::consts::GATEWAY_PERIOD;
            let run_flag = run_flag.clone();
            handles.push(std::thread::spawn(move || {
                gateway::run(hub, driver, period, run_flag)
            }));
        }

        {
            let hub = hub.clone();
            let run_flag = run_flag.clone();
            handles.push(std::thread::spawn(move || {
                telemetry::run(hub, telemetry_sink, run_flag)
            }));
        }

        Self {
            hub,
            events,
            run_flag,
            handles,
        }
    }

    /// Signal every worker to stop at its next period boundary and join them.
    pub fn shutdown(mut self) {
        self.run_flag.store(false, Ordering::Relaxed);
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

/// The controller doesn't have its own module in `tasks::nav_controller`
/// because its inner loop needs the fault latch and operator command in
/// addition to the snapshot/objective every other task reads; wiring that
/// loop lives here rather than duplicating it across call sites.
fn run_nav_controller(
    hub: Arc<DataHub>,
    events: Arc<Events>,
    period: std::time::Duration,
    gains: nav_controller::NavGains,
    run_flag: Arc<AtomicBool>,
) {
    use crate::cycle::Ticker;

    let mut state = nav_controller::NavState::default();
    let mut ticker = Ticker::new(period);

    while run_flag.load(Ordering::Relaxed) {
        let frame = hub.read_snapshot();
        let vehicle = hub.get_state();
        let cmd = hub.get_operator_command();
        let objective = hub.get_objective();
        let fault_active = events.is_active();

        let actuator = nav_controller::compute(&mut state, frame, vehicle, cmd, objective, fault_active, gains);
        hub.set_actuator(actuator);

        ticker.wait_next();
    }
}
