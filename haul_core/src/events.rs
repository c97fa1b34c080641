//! `Events` — the fault latch (spec §4.3, §5, glossary).
//!
//! Grounded on `EventosSistema` (`examples/original_source/src/eventos_sistema.cpp`):
//! a mutex-protected latch with atomic `signal`/`reset` transitions. "First
//! code wins" (spec §4.3): `signal` is a no-op once the latch is already
//! active. Only `CommandLogic`'s rearm handling calls `reset` (spec §4.5).

use std::sync::{Arc, Condvar, Mutex};

use haul_common::types::{FaultCode, FaultLatch};

/// Shared fault latch, cloned cheaply alongside a `DataHub` handle.
pub struct Events {
    inner: Mutex<FaultLatch>,
    cv: Condvar,
}

impl Events {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(FaultLatch::default()),
            cv: Condvar::new(),
        })
    }

    /// Latch `code` if no fault is currently active; idempotent otherwise
    /// (spec §4.3: "the first code wins").
    pub fn signal(&self, code: FaultCode) {
        let mut latch = self.inner.lock().unwrap();
        if !latch.active {
            latch.active = true;
            latch.code = code.code();
            self.cv.notify_all();
        }
    }

    /// Current latch state.
    pub fn get(&self) -> FaultLatch {
        *self.inner.lock().unwrap()
    }

    /// Convenience: whether a fault is currently latched.
    pub fn is_active(&self) -> bool {
        self.inner.lock().unwrap().active
    }

    /// Clear the latch. Exclusive to `CommandLogic`'s rearm handling
    /// (spec §4.5) — callers elsewhere must not invoke this directly.
    pub fn reset(&self) {
        let mut latch = self.inner.lock().unwrap();
        latch.active = false;
        latch.code = 0;
    }
}
