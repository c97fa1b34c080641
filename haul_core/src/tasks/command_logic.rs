//! CommandLogic — the mode supervisor (spec §4.5).
//!
//! State machine over `VehicleState` with inputs `OperatorCommand` and
//! `Events`. Owns the only write path to `VehicleState` (spec §5). Rearm
//! handling executes the post-collision back-off maneuver *before* clearing
//! the latch when the latched code is 4 — the one case where this task
//! writes the actuator channel itself.
//!
//! ## Open design decision (recorded in DESIGN.md)
//!
//! Spec §4.5 says the back-off maneuver "publishes" `{-50, 0}` then
//! `{0, 0}`. During those two seconds the fault is still latched, so
//! `NavigationController` is simultaneously emitting its own fault-branch
//! command (`{-100, current heading}`) to `DataHub.actuator`, and the
//! gateway is draining whichever won the race. Rather than invent new
//! cross-task synchronization to resolve that race, this implementation
//! follows CAS's precedent (spec §4.4: "bypassing the controller") and has
//! `CommandLogic` write the back-off command directly through the
//! `ActuatorPort`, re-asserting it once per gateway period so it dominates
//! even if interleaved with a stale controller write. Both candidate
//! commands brake the truck, so there is no safety difference — only which
//! exact throttle value briefly reaches the driver.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::info;

use haul_common::ports::ActuatorPort;
use haul_common::types::{FaultCode, OperatorCommand, VehicleState};

use crate::cycle::Ticker;
use crate::events::Events;
use crate::hub::DataHub;

/// How often the back-off re-asserts its command while it runs.
const BACKOFF_REASSERT_PERIOD: Duration = Duration::from_millis(100);

/// Run the post-collision back-off maneuver: `{-50, 0}` for the configured
/// duration, then `{0, 0}`, returning once both phases have completed.
fn execute_backoff(actuator: &dyn ActuatorPort, duration: Duration, throttle_pct: i32) {
    info!("command logic: executing post-collision back-off maneuver");
    let start = Instant::now();
    while start.elapsed() < duration {
        let _ = actuator.set_actuators(throttle_pct, 0);
        std::thread::sleep(BACKOFF_REASSERT_PERIOD.min(duration.saturating_sub(start.elapsed())));
    }
    let _ = actuator.set_actuators(0, 0);
    info!("command logic: back-off complete");
}

/// Decide the next vehicle state given the current one, the operator
/// command, and the fault latch's active bit. Pure function so transition
/// logic can be tested independently of the back-off's real-time sleep.
///
/// Returns `(next_state, needs_backoff)`; the caller executes the back-off
/// (a side effect) and then clears the latch before committing `next_state`
/// when `needs_backoff` or a plain rearm occurred.
pub fn decide(current: VehicleState, cmd: OperatorCommand, fault_active: bool) -> VehicleState {
    if cmd.rearm {
        if cmd.request_manual {
            VehicleState {
                fault: false,
                automatic: false,
            }
        } else if cmd.request_automatic {
            VehicleState {
                fault: false,
                automatic: true,
            }
        } else {
            VehicleState {
                fault: false,
                automatic: current.automatic,
            }
        }
    } else if fault_active {
        VehicleState {
            fault: true,
            automatic: current.automatic,
        }
    } else if cmd.request_manual {
        VehicleState {
            fault: false,
            automatic: false,
        }
    } else if cmd.request_automatic {
        VehicleState {
            fault: false,
            automatic: true,
        }
    } else {
        VehicleState {
            fault: false,
            automatic: current.automatic,
        }
    }
}

/// Runs the command/mode supervisor task until `run_flag` is cleared.
pub fn run(
    hub: Arc<DataHub>,
    events: Arc<Events>,
    actuator: Arc<dyn ActuatorPort>,
    period: Duration,
    backoff_duration: Duration,
    backoff_throttle_pct: i32,
    run_flag: Arc<AtomicBool>,
) {
    let mut current = VehicleState::default();
    let mut ticker = Ticker::new(period);

    while run_flag.load(Ordering::Relaxed) {
        let cmd = hub.get_operator_command();
        let latch = events.get();

        if cmd.rearm {
            if latch.active && latch.code == FaultCode::Obstacle.code() {
                execute_backoff(actuator.as_ref(), backoff_duration, backoff_throttle_pct);
            }
            events.reset();
            current = decide(current, cmd, false);
            info!(?current, "command logic: rearm processed");
        } else {
            current = decide(current, cmd, latch.active);
        }

        hub.set_state(current);
        ticker.wait_next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(
        request_automatic: bool,
        request_manual: bool,
        rearm: bool,
    ) -> OperatorCommand {
        OperatorCommand {
            request_automatic,
            request_manual,
            rearm,
            accelerate: false,
            steer_right: false,
            steer_left: false,
        }
    }

    #[test]
    fn fault_latches_into_state() {
        let state = decide(VehicleState::default(), cmd(false, false, false), true);
        assert!(state.fault);
    }

    #[test]
    fn auto_request_selected_when_no_fault() {
        let state = decide(VehicleState::default(), cmd(true, false, false), false);
        assert!(!state.fault);
        assert!(state.automatic);
    }

    #[test]
    fn manual_wins_simultaneous_requests() {
        let state = decide(VehicleState::default(), cmd(true, true, false), false);
        assert!(!state.automatic);
    }

    #[test]
    fn rearm_with_manual_request_takes_manual_ok() {
        let faulted = VehicleState {
            fault: true,
            automatic: true,
        };
        let state = decide(faulted, cmd(false, true, true), false);
        assert!(!state.fault);
        assert!(!state.automatic);
    }

    #[test]
    fn rearm_without_mode_request_preserves_previous_mode() {
        let faulted = VehicleState {
            fault: true,
            automatic: true,
        };
        let state = decide(faulted, cmd(false, false, true), false);
        assert!(!state.fault);
        assert!(state.automatic);
    }

    #[test]
    fn rearm_clears_fault_even_when_fault_input_still_active() {
        // decide() is called with fault_active=false by run() whenever
        // cmd.rearm is set, mirroring "rearm wins over still-active latch
        // at the instant it's processed" (spec §4.5 item 1 runs first).
        let faulted = VehicleState {
            fault: true,
            automatic: false,
        };
        let state = decide(faulted, cmd(false, false, true), true);
        assert!(!state.fault);
    }
}
