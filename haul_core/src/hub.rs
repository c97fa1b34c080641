//! `DataHub` — the concurrency-safe central store (spec §4.1).
//!
//! Grounded on `GerenciadorDados` (`examples/original_source/src/gerenciador_dados.cpp`)
//! and the teacher's per-field locking style: one bounded FIFO `stream`
//! (history, destructive, blocking consume) plus several last-value
//! `snapshot` caches (non-blocking, non-destructive). A single mutex per
//! logical field is the simplest scheme that satisfies spec §5's
//! "shared-resource policy" — none of these fields are read or written
//! together atomically by the spec, so there is no cross-field invariant a
//! finer-grained scheme would need to protect.
//!
//! Workers never hold a `DataHub` by reference; they hold a cheap
//! `Arc`-backed handle (spec §9: "no worker owns another worker").

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};

use haul_common::types::{
    ActuatorCommand, NavigationObjective, OperatorCommand, SensorFrame, VehicleState,
};

/// Central shared-state store for one truck's control plant.
pub struct DataHub {
    capacity: usize,
    history: Mutex<VecDeque<SensorFrame>>,
    history_cv: Condvar,
    snapshot: Mutex<SensorFrame>,
    state: Mutex<VehicleState>,
    operator_command: Mutex<OperatorCommand>,
    actuator: Mutex<ActuatorCommand>,
    objective: Mutex<NavigationObjective>,
}

impl DataHub {
    /// Create an empty hub with the given history capacity.
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            capacity,
            history: Mutex::new(VecDeque::with_capacity(capacity)),
            history_cv: Condvar::new(),
            snapshot: Mutex::new(SensorFrame::zero()),
            state: Mutex::new(VehicleState::default()),
            operator_command: Mutex::new(OperatorCommand::default()),
            actuator: Mutex::new(ActuatorCommand::default()),
            objective: Mutex::new(NavigationObjective::default()),
        })
    }

    /// PRODUCER: append to history (overwrite-oldest on full) and replace
    /// the snapshot. Never blocks (spec §4.1).
    pub fn publish_sensor(&self, frame: SensorFrame) {
        {
            let mut hist = self.history.lock().unwrap();
            if hist.len() == self.capacity {
                hist.pop_front();
            }
            hist.push_back(frame);
        }
        *self.snapshot.lock().unwrap() = frame;
        self.history_cv.notify_one();
    }

    /// LOG CONSUMER: block until the history is non-empty, then pop and
    /// return the oldest frame. Used exclusively by the telemetry logger.
    pub fn consume_sensor(&self) -> SensorFrame {
        let mut hist = self.history.lock().unwrap();
        while hist.is_empty() {
            hist = self.history_cv.wait(hist).unwrap();
        }
        hist.pop_front().expect("non-empty under the wait guard")
    }

    /// Same contract as [`Self::consume_sensor`], but gives up and returns
    /// `None` after `timeout` with nothing published. The telemetry task
    /// uses this instead of the unconditionally-blocking form so it can
    /// still observe the shutdown run flag at period boundaries (spec §5).
    pub fn consume_sensor_timeout(&self, timeout: std::time::Duration) -> Option<SensorFrame> {
        let mut hist = self.history.lock().unwrap();
        loop {
            if let Some(frame) = hist.pop_front() {
                return Some(frame);
            }
            let (guard, result) = self.history_cv.wait_timeout(hist, timeout).unwrap();
            hist = guard;
            if result.timed_out() && hist.is_empty() {
                return None;
            }
        }
    }

    /// CONTROL READER: non-blocking clone of the most recently published
    /// frame, or the zero frame if nothing has been published yet.
    pub fn read_snapshot(&self) -> SensorFrame {
        *self.snapshot.lock().unwrap()
    }

    /// Number of frames currently buffered in the history stream.
    pub fn history_len(&self) -> usize {
        self.history.lock().unwrap().len()
    }

    pub fn set_state(&self, state: VehicleState) {
        *self.state.lock().unwrap() = state;
    }

    pub fn get_state(&self) -> VehicleState {
        *self.state.lock().unwrap()
    }

    pub fn set_operator_command(&self, cmd: OperatorCommand) {
        *self.operator_command.lock().unwrap() = cmd;
    }

    pub fn get_operator_command(&self) -> OperatorCommand {
        *self.operator_command.lock().unwrap()
    }

    pub fn set_actuator(&self, cmd: ActuatorCommand) {
        *self.actuator.lock().unwrap() = cmd;
    }

    pub fn get_actuator(&self) -> ActuatorCommand {
        *self.actuator.lock().unwrap()
    }

    pub fn set_objective(&self, objective: NavigationObjective) {
        *self.objective.lock().unwrap() = objective;
    }

    pub fn get_objective(&self) -> NavigationObjective {
        *self.objective.lock().unwrap()
    }
}
