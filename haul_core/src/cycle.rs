//! Drift-free periodic scheduling (spec §5).
//!
//! Grounded on `evo_control_unit::cycle`'s "absolute-time sleep" approach,
//! simplified from `clock_nanosleep(TIMER_ABSTIME)` + RT priority/CPU
//! affinity pinning to plain `std::thread::sleep` against a precomputed
//! deadline — this plant is simulated, not bare-metal, so the RT scheduling
//! machinery is dropped (see DESIGN.md). The drift-free property is what
//! spec §5 actually requires: `next_tick = previous_tick + period`, never
//! `sleep(period)` from "now".

use std::time::{Duration, Instant};

/// Computes successive wake-up instants `period` apart, never drifting
/// relative to the first tick even if a cycle body overruns occasionally.
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    /// Block until the next scheduled tick, then advance the schedule.
    ///
    /// If a cycle overran its period, `next` is already in the past —
    /// `sleep_until`-style logic here sleeps zero and immediately advances
    /// to the following boundary, so a single slow cycle does not cause a
    /// permanent phase shift.
    pub fn wait_next(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
        }
        self.next += self.period;
        // If we're still behind after advancing once (e.g. the thread was
        // descheduled for multiple periods), resync to "now + period"
        // rather than fire a burst of back-to-back ticks.
        let now = Instant::now();
        if self.next < now {
            self.next = now + self.period;
        }
    }
}
