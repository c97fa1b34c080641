//! Bicycle-model truck physics (test/demo double for the plant, SPEC_FULL §9 non-goals).
//!
//! Grounded on `SimulacaoMina::modelo_bicicleta` / `modelo_maquina_termica`
//! (`examples/original_source/src/simulacao_mina.cpp`): position integrates
//! along the current heading at the current speed (`0 deg = east`, matching
//! `i_angulo_x`'s own convention, which is also the convention
//! `haul_common::heading` picked for the core), and engine temperature heats
//! proportionally to speed and cools toward ambient. This is a minimal
//! kinematic double, not a physics engine — acceleration from throttle and
//! a bounded turn rate toward the commanded heading are this crate's own
//! simplification of the original's incomplete acceleration wiring (several
//! of the original's drafts set `o_aceleracao`/`o_direcao` but never
//! integrate them into `velocidade`; we complete that loop since the core
//! needs a responsive plant to drive against).

use haul_common::heading::{normalise360, normalise_signed};

/// Throttle-to-acceleration gain: `throttle_pct in [-100,100]` maps to
/// `[-MAX_ACCEL, MAX_ACCEL]` m/s^2.
const MAX_ACCEL_MPS2: f64 = 3.0;

/// Maximum heading change per second while tracking a commanded heading.
const MAX_TURN_RATE_DEG_S: f64 = 90.0;

/// Heat generated per m/s of speed (original: `heat_gen = |v| * 0.5`).
const HEAT_GEN_COEFF: f64 = 0.5;

/// Newton-cooling coefficient toward ambient (original: `0.1 * (T - ambient)`).
const HEAT_LOSS_COEFF: f64 = 0.1;

/// Ambient temperature the engine cools toward at rest.
const AMBIENT_TEMP_C: f64 = 25.0;

/// Continuous truck state, advanced one `step` at a time.
#[derive(Debug, Clone, Copy)]
pub struct TruckPhysics {
    pub x: f64,
    pub y: f64,
    /// Degrees, `[0, 360)`, east = 0, counter-clockwise.
    pub heading: f64,
    /// m/s, never negative (a haul truck does not reverse under this model).
    pub speed: f64,
    pub temp_c: f64,
}

impl TruckPhysics {
    pub fn new(x: f64, y: f64, heading: f64, temp_c: f64) -> Self {
        Self {
            x,
            y,
            heading: normalise360(heading),
            speed: 0.0,
            temp_c,
        }
    }

    /// Advance the plant by `dt` seconds under the given actuator command.
    pub fn step(&mut self, dt: f64, throttle_pct: i32, heading_cmd_deg: i32) {
        let accel = throttle_pct as f64 / 100.0 * MAX_ACCEL_MPS2;
        self.speed = (self.speed + accel * dt).max(0.0);

        let heading_error = normalise_signed(heading_cmd_deg as f64 - self.heading);
        let max_step = MAX_TURN_RATE_DEG_S * dt;
        let turn = heading_error.clamp(-max_step, max_step);
        self.heading = normalise360(self.heading + turn);

        let rad = self.heading.to_radians();
        self.x += self.speed * rad.cos() * dt;
        self.y += self.speed * rad.sin() * dt;

        let heat_gen = self.speed.abs() * HEAT_GEN_COEFF;
        let heat_loss = HEAT_LOSS_COEFF * (self.temp_c - AMBIENT_TEMP_C);
        self.temp_c += (heat_gen - heat_loss) * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accelerates_toward_max_throttle() {
        let mut p = TruckPhysics::new(0.0, 0.0, 0.0, 25.0);
        for _ in 0..10 {
            p.step(0.1, 100, 0);
        }
        assert!(p.speed > 0.0);
        assert!((p.speed - MAX_ACCEL_MPS2).abs() < 1e-9);
    }

    #[test]
    fn full_brake_never_drives_speed_negative() {
        let mut p = TruckPhysics::new(0.0, 0.0, 0.0, 25.0);
        p.speed = 1.0;
        for _ in 0..50 {
            p.step(0.1, -100, 0);
        }
        assert_eq!(p.speed, 0.0);
    }

    #[test]
    fn heading_tracks_command_at_bounded_rate() {
        let mut p = TruckPhysics::new(0.0, 0.0, 0.0, 25.0);
        p.step(0.1, 0, 90);
        // 90 deg/s max rate * 0.1s = 9 deg this tick, not an instant snap.
        assert!((p.heading - 9.0).abs() < 1e-9);
    }

    #[test]
    fn position_advances_along_heading() {
        let mut p = TruckPhysics::new(0.0, 0.0, 0.0, 25.0);
        p.speed = 10.0;
        p.step(1.0, 0, 0);
        assert!((p.x - 10.0).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn temperature_relaxes_toward_ambient_at_rest() {
        let mut p = TruckPhysics::new(0.0, 0.0, 0.0, 85.0);
        for _ in 0..500 {
            p.step(0.1, 0, 0);
        }
        assert!((p.temp_c - AMBIENT_TEMP_C).abs() < 1.0);
    }
}
