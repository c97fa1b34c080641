//! SensorTask — the producer task (spec §4.2).
//!
//! Reads `SensorPort::read_sensor_data`, perturbs position and heading with
//! Gaussian noise (simulation parity), runs each continuous channel through
//! its own [`EmaFilter`], and publishes the result to `DataHub`. Engine
//! temperature, lidar distance, and the fault bits pass through unfiltered
//! so `FaultMonitor` never has its thresholds masked by smoothing
//! (spec §4.2, §9 "temperature filtering omission").

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, warn};

use haul_common::heading::normalise360;
use haul_common::ports::SensorPort;

use crate::cycle::Ticker;
use crate::hub::DataHub;

/// Standard deviation of simulated position noise [m].
const POSITION_NOISE_SIGMA_M: f64 = 1.0;
/// Standard deviation of simulated heading noise [deg].
const HEADING_NOISE_SIGMA_DEG: f64 = 2.0;

/// First-order exponential moving average filter.
///
/// `ema_next = (raw - ema_prev) * k + ema_prev` (spec §4.2). The first
/// sample initialises the filter directly from the raw value to avoid a
/// start-up transient.
#[derive(Debug, Clone, Copy)]
pub struct EmaFilter {
    k: f64,
    value: Option<f64>,
}

impl EmaFilter {
    pub fn new(k: f64) -> Self {
        Self { k, value: None }
    }

    pub fn update(&mut self, raw: f64) -> f64 {
        let next = match self.value {
            None => raw,
            Some(prev) => (raw - prev) * self.k + prev,
        };
        self.value = Some(next);
        next
    }
}

/// Draws a standard-normal sample via the Box-Muller transform.
fn standard_normal(rng: &mut ThreadRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Per-task EMA state for the three filtered channels (x, y, heading).
pub struct SensorFilters {
    x: EmaFilter,
    y: EmaFilter,
    heading: EmaFilter,
}

impl SensorFilters {
    pub fn new(k: f64) -> Self {
        Self {
            x: EmaFilter::new(k),
            y: EmaFilter::new(k),
            heading: EmaFilter::new(k),
        }
    }
}

/// Runs the sensor acquisition task until `run` is cleared.
///
/// `inject_noise` lets tests disable the Gaussian perturbation for
/// deterministic assertions; production wiring always passes `true`.
pub fn run(
    hub: Arc<DataHub>,
    driver: Arc<dyn SensorPort>,
    truck_id: u8,
    period: std::time::Duration,
    ema_k: f64,
    inject_noise: bool,
    run_flag: Arc<AtomicBool>,
) {
    let mut filters = SensorFilters::new(ema_k);
    let mut rng = rand::thread_rng();
    let mut ticker = Ticker::new(period);

    while run_flag.load(Ordering::Relaxed) {
        match driver.read_sensor_data(truck_id) {
            Ok(mut frame) => {
                if inject_noise {
                    frame.x += standard_normal(&mut rng) * POSITION_NOISE_SIGMA_M;
                    frame.y += standard_normal(&mut rng) * POSITION_NOISE_SIGMA_M;
                    frame.heading =
                        normalise360(frame.heading + standard_normal(&mut rng) * HEADING_NOISE_SIGMA_DEG);
                }

                frame.x = filters.x.update(frame.x);
                frame.y = filters.y.update(frame.y);
                frame.heading = normalise360(filters.heading.update(frame.heading));

                debug!(
                    x = frame.x,
                    y = frame.y,
                    heading = frame.heading,
                    "sensor frame published"
                );
                hub.publish_sensor(frame);
            }
            Err(e) => {
                warn!(error = %e, "sensor read failed, retaining last snapshot");
            }
        }
        ticker.wait_next();
    }
}
