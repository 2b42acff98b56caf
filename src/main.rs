use catpoint_security::config::{self, Config};
use catpoint_security::data::JsonFileSecurityRepository;
use catpoint_security::image::FakeImageService;
use catpoint_security::model::ArmingStatus;
use catpoint_security::service::{LoggingStatusListener, SecurityService};
use catpoint_security::simulation::{self, SimulationSettings};
use clap::Parser;
use log::info;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Run the security controller against simulated sensors and camera frames.
#[derive(Debug, Parser)]
#[command(name = "catpoint-security", version, about)]
struct Args {
    /// JSON file holding sensors and alarm/arming status
    #[arg(long, env = "CATPOINT_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Seconds between simulated events
    #[arg(long, env = "CATPOINT_SIM_INTERVAL_SECS", value_parser = clap::value_parser!(u64).range(1..))]
    interval_secs: Option<u64>,

    /// Arming mode applied on startup (DISARMED, ARMED_HOME, ARMED_AWAY)
    #[arg(long)]
    arm: Option<ArmingStatus>,

    /// Stop after this many simulated events
    #[arg(long)]
    ticks: Option<u64>,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env file before anything else
    config::load_dotenv();
    init_logger();
    info!("Starting Catpoint security controller");

    let args = Args::parse();
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(path) = args.data_file {
        config.storage.data_file = path;
    }
    if let Some(secs) = args.interval_secs {
        config.simulation.interval_secs = secs;
    }
    if args.arm.is_some() {
        config.simulation.initial_arming = args.arm;
    }

    info!("Configuration loaded:");
    info!("  Event interval: {}s", config.simulation.interval_secs);

    let repository = match JsonFileSecurityRepository::open(&config.storage.data_file) {
        Ok(repository) => {
            info!("  Data file: {:?}", repository.path());
            Arc::new(repository)
        }
        Err(e) => {
            log::error!("Failed to open security state: {}", e);
            std::process::exit(1);
        }
    };

    let mut service = SecurityService::new(repository, Arc::new(FakeImageService::new()));
    service.add_status_listener(Arc::new(LoggingStatusListener));

    if let Err(e) = simulation::ensure_default_sensors(&service) {
        log::error!("Failed to register sensors: {}", e);
        std::process::exit(1);
    }
    if let Some(arming) = config.simulation.initial_arming
        && let Err(e) = service.set_arming_status(arming)
    {
        log::error!("Failed to apply arming status {}: {}", arming, e);
        std::process::exit(1);
    }

    match (service.get_arming_status(), service.get_alarm_status()) {
        (Ok(arming), Ok(alarm)) => info!(
            "System is {} / {}",
            arming.description(),
            alarm.description()
        ),
        (Err(e), _) | (_, Err(e)) => log::warn!("Failed to read status: {}", e),
    }

    let service = Arc::new(Mutex::new(service));
    let simulation_task = simulation::run_simulation(
        service.clone(),
        SimulationSettings {
            interval: Duration::from_secs(config.simulation.interval_secs),
            ticks: args.ticks,
        },
    );

    info!("Catpoint security controller is running");
    info!("  - Press Ctrl+C to exit");

    tokio::select! {
        result = simulation_task => {
            match result {
                Ok(()) => info!("Simulation finished"),
                Err(e) => {
                    log::error!("Simulation task failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        result = signal::ctrl_c() => {
            match result {
                Ok(()) => info!("Received shutdown signal"),
                Err(e) => log::error!("Failed to listen for shutdown signal: {}", e),
            }
        }
    }

    info!("Catpoint security controller stopped");
}
