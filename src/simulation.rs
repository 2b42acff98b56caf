//! Event simulation for development and testing.
//!
//! Drives the security service the way real hardware would: sensors flip
//! and camera frames arrive on a timer. All engine calls go through one
//! mutex, so each event is applied completely before the next.

use crate::error::Result;
use crate::image::CameraImage;
use crate::model::{Sensor, SensorType};
use crate::service::SecurityService;
use log::{error, info};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};

/// Side length of the synthetic camera frames.
const FRAME_SIZE: u32 = 8;

#[derive(Debug, Clone, Copy)]
pub struct SimulationSettings {
    pub interval: Duration,
    /// Stop after this many ticks; `None` runs until aborted.
    pub ticks: Option<u64>,
}

/// Register a small default house if the repository has no sensors yet.
pub fn ensure_default_sensors(service: &SecurityService) -> Result<()> {
    if !service.get_sensors()?.is_empty() {
        return Ok(());
    }
    for sensor in [
        Sensor::new("Front Door", SensorType::Door),
        Sensor::new("Living Room Window", SensorType::Window),
        Sensor::new("Hallway", SensorType::Motion),
    ] {
        info!("[Sim] Registering {} sensor '{}'", sensor.sensor_type(), sensor.name());
        service.add_sensor(sensor)?;
    }
    Ok(())
}

/// Toggle one random sensor, then feed one random frame to the camera.
pub fn simulate_tick(service: &mut SecurityService, rng: &mut impl Rng) -> Result<()> {
    if let Some(mut sensor) = service.get_sensors()?.into_iter().choose(rng) {
        let active = !sensor.is_active();
        info!("[Sim] Sensor '{}' -> {}", sensor.name(), if active { "active" } else { "inactive" });
        service.change_sensor_activation_status(&mut sensor, active)?;
    }

    let mut pixels = vec![0u8; (FRAME_SIZE * FRAME_SIZE * 3) as usize];
    rng.fill(pixels.as_mut_slice());
    service.process_image(&CameraImage::new(FRAME_SIZE, FRAME_SIZE, pixels))
}

/// Spawn a task that periodically simulates sensor and camera events.
///
/// Errors from a tick are logged and the simulation carries on.
///
/// # Returns
///
/// A `JoinHandle` that can be used to abort the simulation task.
pub fn run_simulation(
    service: Arc<Mutex<SecurityService>>,
    settings: SimulationSettings,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut interval = interval(settings.interval);
        let mut tick: u64 = 0;
        loop {
            if settings.ticks.is_some_and(|limit| tick >= limit) {
                info!("[Sim] Finished after {} ticks", tick);
                break;
            }
            interval.tick().await;
            tick += 1;

            let mut guard = service.lock();
            if let Err(e) = simulate_tick(&mut guard, &mut rng) {
                error!("[Sim] Tick {} failed: {}", tick, e);
            }
        }
    })
}
