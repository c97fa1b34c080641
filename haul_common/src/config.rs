//! TOML configuration loading (SPEC_FULL §2 ambient stack).
//!
//! Mirrors `evo_common::config::load_config_dir`'s shape: a `serde`-derived
//! struct, a `load_from_path` free function, and a distinct error per
//! failure kind (`ConfigError`). Any field omitted from the TOML file
//! falls back to the operational constant from [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::ConfigError;

/// On-disk form of the operational constants table (spec §6) plus the
/// fields that only matter at the core boundary: truck id and driver
/// selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruckConfig {
    /// Which truck this process controls.
    pub truck_id: u8,
    /// `"simulation"` or the name of an external driver; resolved by the
    /// `haul` binary's wiring code, not by this crate.
    pub driver: String,

    pub history_capacity: usize,
    pub arrival_radius_m: f64,
    pub safe_distance_m: f64,
    pub ema_n: f64,
    pub wheelbase_m: f64,
    pub lookahead_k_s: f64,
    pub lookahead_min_m: f64,
    pub kp_v: f64,
    pub ki_v: f64,
    pub temp_warn_c: i32,
    pub temp_fault_c: i32,
}

impl Default for TruckConfig {
    fn default() -> Self {
        Self {
            truck_id: 0,
            driver: "simulation".to_string(),
            history_capacity: consts::HISTORY_CAPACITY,
            arrival_radius_m: consts::ARRIVAL_RADIUS_M,
            safe_distance_m: consts::SAFE_DISTANCE_M,
            ema_n: consts::EMA_N,
            wheelbase_m: consts::WHEELBASE_M,
            lookahead_k_s: consts::LOOKAHEAD_K_S,
            lookahead_min_m: consts::LOOKAHEAD_MIN_M,
            kp_v: consts::KP_V,
            ki_v: consts::KI_V,
            temp_warn_c: consts::TEMP_WARN_C,
            temp_fault_c: consts::TEMP_FAULT_C,
        }
    }
}

impl TruckConfig {
    /// Validate semantic constraints a pure `Deserialize` can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temp_warn_c >= self.temp_fault_c {
            return Err(ConfigError::Validation(format!(
                "temp_warn_c ({}) must be < temp_fault_c ({})",
                self.temp_warn_c, self.temp_fault_c
            )));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Validation(
                "history_capacity must be > 0".to_string(),
            ));
        }
        if self.ema_n <= 0.0 {
            return Err(ConfigError::Validation("ema_n must be > 0".to_string()));
        }
        if self.safe_distance_m <= 0.0 || self.arrival_radius_m <= 0.0 {
            return Err(ConfigError::Validation(
                "safe_distance_m and arrival_radius_m must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// The EMA smoothing constant `K = 2 / (N + 1)` (spec §4.2).
    pub fn ema_k(&self) -> f64 {
        2.0 / (self.ema_n + 1.0)
    }
}

/// Load and validate a [`TruckConfig`] from a TOML file.
pub fn load_from_path(path: &Path) -> Result<TruckConfig, ConfigError> {
    let text = std::fs::read_to_string(path)
        .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;
    let cfg: TruckConfig = toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}
