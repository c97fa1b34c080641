//! Orchestrator binary for the haul truck control plant (SPEC_FULL §2, §9).
//!
//! Wires a `TruckConfig`, a concrete driver (`haul_sim::SimulationDriver` for
//! now; `--simulate` is kept as an explicit flag per spec §9's note that the
//! orchestrator — not the core — decides which driver to run against), and
//! an optional initial mission file into a running `haul_core::plant::Plant`,
//! then waits for a shutdown signal. Grounded on `evo_hal/src/main.rs`'s
//! `Args`/`setup_tracing`/`ctrlc`/`run()` shape.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

use haul_common::config::{self, TruckConfig};
use haul_common::ports::RoutePort;
use haul_core::plant::Plant;
use haul_core::tasks::telemetry::TracingTelemetrySink;
use haul_sim::{SimulationDriver, StaticRoutePort};

/// Haul truck control plant orchestrator.
#[derive(Parser, Debug)]
#[command(name = "haul")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Autonomous haul truck control plant")]
#[command(long_about = None)]
struct Args {
    /// Path to the truck configuration file (TOML). Falls back to the
    /// operational constants of spec §6 when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force the simulation driver (the only driver this crate ships).
    #[arg(short = 's', long)]
    simulate: bool,

    /// Enable verbose (debug) logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,

    /// Override the truck id from the config file.
    #[arg(long)]
    truck_id: Option<u8>,

    /// Initial mission file (JSON `{"route": [...]}`), injected before the
    /// plant starts.
    #[arg(short, long)]
    mission: Option<PathBuf>,
}

/// Exit codes per spec §6: 0 = normal shutdown, 1 = driver initialisation
/// failure, 2 = operator-triggered abort.
mod exit_code {
    pub const NORMAL: i32 = 0;
    pub const INIT_FAILURE: i32 = 1;
    pub const OPERATOR_ABORT: i32 = 2;
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    match run(args) {
        Ok(aborted) => {
            if aborted {
                info!("haul: shutdown complete (operator abort)");
                std::process::exit(exit_code::OPERATOR_ABORT);
            }
            info!("haul: shutdown complete");
            std::process::exit(exit_code::NORMAL);
        }
        Err(e) => {
            error!("haul: startup failed: {e}");
            std::process::exit(exit_code::INIT_FAILURE);
        }
    }
}

fn run(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    info!("haul control plant v{} starting", env!("CARGO_PKG_VERSION"));

    let mut cfg = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => {
            info!("no --config given, running with default TruckConfig");
            TruckConfig::default()
        }
    };
    if let Some(id) = args.truck_id {
        cfg.truck_id = id;
    }
    if args.simulate {
        cfg.driver = "simulation".to_string();
    }

    if cfg.driver != "simulation" {
        // Only the simulation driver ships in this crate (spec §1 Non-goals:
        // external drivers are out of scope beyond a minimal test double).
        warn!(driver = %cfg.driver, "unknown driver requested, falling back to simulation");
    }

    let driver = Arc::new(SimulationDriver::new(cfg.truck_id));

    // The mission file, if any, is served through a dedicated `RoutePort`
    // rather than the simulation driver's own `inject_route` test hook —
    // route delivery is its own capability (spec §9 "dynamic polymorphism
    // over drivers"), decoupled from which sensor/actuator driver is wired.
    let route_port: Arc<dyn RoutePort> = match &args.mission {
        Some(path) => {
            info!(path = %path.display(), "loading initial mission");
            Arc::new(StaticRoutePort::from_file(path))
        }
        None => driver.clone(),
    };

    let plant = Plant::spawn(
        &cfg,
        driver.clone(),
        driver.clone(),
        route_port,
        Arc::new(TracingTelemetrySink),
    );

    let aborted = Arc::new(AtomicBool::new(false));
    let aborted_handler = aborted.clone();
    ctrlc::set_handler(move || {
        info!("received shutdown signal");
        aborted_handler.store(true, Ordering::SeqCst);
    })?;

    while !aborted.load(Ordering::Relaxed) {
        std::thread::sleep(std::time::Duration::from_millis(50));
    }

    plant.shutdown();
    Ok(aborted.load(Ordering::Relaxed))
}

/// Mirrors `evo_hal::setup_tracing`: env-filter driven level, optional JSON
/// formatting.
fn setup_tracing(args: &Args) {
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
