//! Security decision engine.
//!
//! Receives sensor, arming and camera events, applies the alarm transition
//! rules and forwards every resulting change to the repository and to the
//! registered [`StatusListener`]s.
//!
//! The service holds no synchronisation of its own. Callers sharing it
//! between threads wrap it in a single mutex so each operation, including
//! its notifications, completes before the next one starts.

use super::listener::StatusListener;
use crate::data::SecurityRepository;
use crate::error::Result;
use crate::image::{CameraImage, ImageService};
use crate::model::{AlarmStatus, ArmingStatus, Sensor};
use log::{debug, info};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Confidence (0-100) the image service must reach to report a cat.
pub const CAT_CONFIDENCE_THRESHOLD: f32 = 50.0;

pub struct SecurityService {
    repository: Arc<dyn SecurityRepository>,
    image_service: Arc<dyn ImageService>,
    status_listeners: Vec<Arc<dyn StatusListener>>,
    /// Result of the most recent image analysis. Not persisted.
    cat_detected: bool,
}

impl SecurityService {
    pub fn new(
        repository: Arc<dyn SecurityRepository>,
        image_service: Arc<dyn ImageService>,
    ) -> Self {
        Self {
            repository,
            image_service,
            status_listeners: Vec::new(),
            cat_detected: false,
        }
    }

    /// Whether the last processed frame showed a cat.
    pub fn is_cat_detected(&self) -> bool {
        self.cat_detected
    }

    /// Change the arming mode.
    ///
    /// Arming home while a cat is on camera raises the alarm immediately,
    /// disarming clears it. Either armed mode resets every sensor to
    /// inactive before the new mode is stored.
    pub fn set_arming_status(&self, arming_status: ArmingStatus) -> Result<()> {
        debug!(
            "Arming status requested: {} (cat_detected={})",
            arming_status, self.cat_detected
        );

        if self.cat_detected && arming_status == ArmingStatus::ArmedHome {
            self.set_alarm_status(AlarmStatus::Alarm)?;
        } else if arming_status == ArmingStatus::Disarmed {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }

        if arming_status.is_armed() {
            self.reset_all_sensors()?;
        }

        self.repository.set_arming_status(arming_status)?;
        info!(
            "Arming status set to {} ({})",
            arming_status,
            arming_status.description()
        );
        Ok(())
    }

    /// Apply a sensor activation change and update the alarm status.
    ///
    /// The all-inactive check runs before `sensor` is given its new flag,
    /// against the stored sensors with `sensor` as it stands at that point.
    /// A sensor switching off has already been cleared by then; a sensor
    /// switching on has not, so the only sensor in the house switching on
    /// goes to pending and straight back to no alarm.
    pub fn change_sensor_activation_status(&self, sensor: &mut Sensor, active: bool) -> Result<()> {
        debug!(
            "Sensor {} ({}) change: {} -> {}",
            sensor.name(),
            sensor.sensor_type(),
            sensor.is_active(),
            active
        );

        match (sensor.is_active(), active) {
            (_, true) => self.handle_sensor_activated()?,
            (true, false) => sensor.set_active(false),
            (false, false) => {}
        }

        if self.all_sensors_inactive_with(sensor)? {
            self.handle_all_sensors_deactivated()?;
        }

        sensor.set_active(active);
        self.repository.update_sensor(sensor)
    }

    /// Analyse a camera frame and update the alarm status accordingly.
    pub fn process_image(&mut self, image: &CameraImage) -> Result<()> {
        let cat = self
            .image_service
            .image_contains_cat(image, CAT_CONFIDENCE_THRESHOLD)?;
        self.handle_cat_detected(cat)
    }

    /// Store the alarm status and notify every listener.
    ///
    /// All alarm status changes go through here.
    pub fn set_alarm_status(&self, status: AlarmStatus) -> Result<()> {
        self.repository.set_alarm_status(status)?;
        info!("Alarm status set to {} ({})", status, status.description());
        for listener in &self.status_listeners {
            listener.notify(status);
        }
        Ok(())
    }

    /// Register a listener. Registering the same listener twice has no effect.
    pub fn add_status_listener(&mut self, listener: Arc<dyn StatusListener>) {
        if !self
            .status_listeners
            .iter()
            .any(|existing| same_listener(existing, &listener))
        {
            self.status_listeners.push(listener);
        }
    }

    pub fn remove_status_listener(&mut self, listener: &Arc<dyn StatusListener>) {
        self.status_listeners
            .retain(|existing| !same_listener(existing, listener));
    }

    pub fn get_alarm_status(&self) -> Result<AlarmStatus> {
        self.repository.get_alarm_status()
    }

    pub fn get_arming_status(&self) -> Result<ArmingStatus> {
        self.repository.get_arming_status()
    }

    pub fn get_sensors(&self) -> Result<BTreeSet<Sensor>> {
        self.repository.get_sensors()
    }

    pub fn add_sensor(&self, sensor: Sensor) -> Result<()> {
        self.repository.add_sensor(sensor)
    }

    pub fn remove_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.repository.remove_sensor(sensor)
    }

    fn handle_cat_detected(&mut self, cat: bool) -> Result<()> {
        self.cat_detected = cat;

        if cat && self.repository.get_arming_status()? == ArmingStatus::ArmedHome {
            self.set_alarm_status(AlarmStatus::Alarm)?;
        } else if !cat && self.all_sensors_inactive()? {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }

        for listener in &self.status_listeners {
            listener.cat_detected(cat);
        }
        Ok(())
    }

    fn handle_sensor_activated(&self) -> Result<()> {
        if self.repository.get_arming_status()? == ArmingStatus::Disarmed {
            return Ok(());
        }
        match self.repository.get_alarm_status()? {
            AlarmStatus::NoAlarm => self.set_alarm_status(AlarmStatus::PendingAlarm),
            AlarmStatus::PendingAlarm => self.set_alarm_status(AlarmStatus::Alarm),
            AlarmStatus::Alarm => Ok(()),
        }
    }

    fn handle_all_sensors_deactivated(&self) -> Result<()> {
        if self.repository.get_alarm_status()? == AlarmStatus::PendingAlarm {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }
        Ok(())
    }

    fn reset_all_sensors(&self) -> Result<()> {
        for mut sensor in self.repository.get_sensors()? {
            sensor.set_active(false);
            self.repository.update_sensor(&sensor)?;
        }
        Ok(())
    }

    fn all_sensors_inactive(&self) -> Result<bool> {
        Ok(!self.repository.get_sensors()?.iter().any(Sensor::is_active))
    }

    /// Like [`Self::all_sensors_inactive`], but the stored copy of `current`
    /// is replaced by `current` itself.
    fn all_sensors_inactive_with(&self, current: &Sensor) -> Result<bool> {
        Ok(!self.repository.get_sensors()?.iter().any(|stored| {
            if stored == current {
                current.is_active()
            } else {
                stored.is_active()
            }
        }))
    }
}

fn same_listener(a: &Arc<dyn StatusListener>, b: &Arc<dyn StatusListener>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
