//! Storage boundary for sensors and the global alarm/arming status.
//!
//! The decision engine reads and writes all persistent state through
//! [`SecurityRepository`]; it never keeps its own copy.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileSecurityRepository;
pub use memory::InMemorySecurityRepository;

use crate::error::Result;
use crate::model::{AlarmStatus, ArmingStatus, Sensor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Storage operations the security service relies on.
///
/// Implementations use interior mutability so a single repository can be
/// shared behind an `Arc`. Failures are reported through [`Result`] and are
/// passed through the service untouched.
pub trait SecurityRepository: Send + Sync {
    fn add_sensor(&self, sensor: Sensor) -> Result<()>;
    fn remove_sensor(&self, sensor: &Sensor) -> Result<()>;
    /// Replace the stored sensor that has the same identity.
    fn update_sensor(&self, sensor: &Sensor) -> Result<()>;
    fn set_alarm_status(&self, status: AlarmStatus) -> Result<()>;
    fn set_arming_status(&self, status: ArmingStatus) -> Result<()>;
    fn get_sensors(&self) -> Result<BTreeSet<Sensor>>;
    fn get_alarm_status(&self) -> Result<AlarmStatus>;
    fn get_arming_status(&self) -> Result<ArmingStatus>;
}

/// Complete repository contents, shared by the in-memory and file backends.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SecurityState {
    #[serde(default)]
    pub alarm_status: AlarmStatus,
    #[serde(default)]
    pub arming_status: ArmingStatus,
    #[serde(default)]
    pub sensors: BTreeSet<Sensor>,
}

impl SecurityState {
    pub fn add_sensor(&mut self, sensor: Sensor) {
        self.sensors.replace(sensor);
    }

    pub fn remove_sensor(&mut self, sensor: &Sensor) {
        self.sensors.remove(sensor);
    }

    /// Overwrite a known sensor. Unknown sensors are ignored.
    pub fn update_sensor(&mut self, sensor: &Sensor) {
        if self.sensors.contains(sensor) {
            self.sensors.replace(sensor.clone());
        }
    }
}
