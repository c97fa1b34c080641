//! NavigationController micro-benchmark, mirroring
//! `evo_control_unit/benches/pid_benchmark.rs`'s per-cycle cost measurement.
//!
//! Measures throughput of `nav_controller::compute` alone — this is the
//! "hard part" of the control plant (spec §4.7) and the one task whose
//! per-cycle cost is worth tracking against the 100ms budget it runs under.

use criterion::{Criterion, criterion_group, criterion_main};

use haul_common::types::{NavigationObjective, OperatorCommand, SensorFrame, VehicleState};
use haul_core::tasks::nav_controller::{NavGains, NavState, compute};

fn reference_gains() -> NavGains {
    NavGains::default()
}

fn bench_auto_pursuit_cycle(c: &mut Criterion) {
    let gains = reference_gains();
    let mut state = NavState::default();
    let frame = SensorFrame {
        x: 0.0,
        y: 0.0,
        heading: 10.0,
        speed: 8.0,
        ..SensorFrame::zero()
    };
    let vehicle = VehicleState {
        fault: false,
        automatic: true,
    };
    let cmd = OperatorCommand::default();
    let objective = NavigationObjective {
        active: true,
        target_x: 120.0,
        target_y: 40.0,
        reference_speed: 18.0,
    };

    c.bench_function("nav_controller_compute_auto_pursuit", |b| {
        b.iter(|| compute(&mut state, frame, vehicle, cmd, objective, false, gains));
    });
}

fn bench_manual_cycle(c: &mut Criterion) {
    let gains = reference_gains();
    let mut state = NavState::default();
    let frame = SensorFrame {
        heading: 200.0,
        speed: 6.0,
        ..SensorFrame::zero()
    };
    let vehicle = VehicleState {
        fault: false,
        automatic: false,
    };
    let mut cmd = OperatorCommand::default();
    cmd.accelerate = true;
    cmd.steer_right = true;

    c.bench_function("nav_controller_compute_manual", |b| {
        b.iter(|| compute(&mut state, frame, vehicle, cmd, NavigationObjective::default(), false, gains));
    });
}

criterion_group!(benches, bench_auto_pursuit_cycle, bench_manual_cycle);
criterion_main!(benches);
