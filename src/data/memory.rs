//! Volatile repository backend.

use super::{SecurityRepository, SecurityState};
use crate::error::Result;
use crate::model::{AlarmStatus, ArmingStatus, Sensor};
use parking_lot::RwLock;
use std::collections::BTreeSet;

/// Thread-safe repository kept entirely in memory. Never fails.
#[derive(Debug, Default)]
pub struct InMemorySecurityRepository {
    state: RwLock<SecurityState>,
}

impl InMemorySecurityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing state, e.g. for tests or after a restore.
    pub fn with_state(state: SecurityState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> SecurityState {
        self.state.read().clone()
    }
}

impl SecurityRepository for InMemorySecurityRepository {
    fn add_sensor(&self, sensor: Sensor) -> Result<()> {
        self.state.write().add_sensor(sensor);
        Ok(())
    }

    fn remove_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.state.write().remove_sensor(sensor);
        Ok(())
    }

    fn update_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.state.write().update_sensor(sensor);
        Ok(())
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<()> {
        self.state.write().alarm_status = status;
        Ok(())
    }

    fn set_arming_status(&self, status: ArmingStatus) -> Result<()> {
        self.state.write().arming_status = status;
        Ok(())
    }

    fn get_sensors(&self) -> Result<BTreeSet<Sensor>> {
        Ok(self.state.read().sensors.clone())
    }

    fn get_alarm_status(&self) -> Result<AlarmStatus> {
        Ok(self.state.read().alarm_status)
    }

    fn get_arming_status(&self) -> Result<ArmingStatus> {
        Ok(self.state.read().arming_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SensorType;

    #[test]
    fn test_initial_state() {
        let repo = InMemorySecurityRepository::new();
        assert_eq!(repo.get_alarm_status().unwrap(), AlarmStatus::NoAlarm);
        assert_eq!(repo.get_arming_status().unwrap(), ArmingStatus::Disarmed);
        assert!(repo.get_sensors().unwrap().is_empty());
    }

    #[test]
    fn test_sensor_crud() {
        let repo = InMemorySecurityRepository::new();
        let sensor = Sensor::new("Back Door", SensorType::Door);

        repo.add_sensor(sensor.clone()).unwrap();
        assert_eq!(repo.get_sensors().unwrap().len(), 1);

        repo.update_sensor(&sensor.clone().with_active(true)).unwrap();
        assert!(repo.get_sensors().unwrap().iter().all(Sensor::is_active));

        repo.remove_sensor(&sensor).unwrap();
        assert!(repo.get_sensors().unwrap().is_empty());
    }

    #[test]
    fn test_status_round_trip() {
        let repo = InMemorySecurityRepository::new();
        repo.set_alarm_status(AlarmStatus::PendingAlarm).unwrap();
        repo.set_arming_status(ArmingStatus::ArmedAway).unwrap();

        let snapshot = repo.snapshot();
        assert_eq!(snapshot.alarm_status, AlarmStatus::PendingAlarm);
        assert_eq!(snapshot.arming_status, ArmingStatus::ArmedAway);
    }

    #[test]
    fn test_returned_sensors_are_copies() {
        let repo = InMemorySecurityRepository::new();
        repo.add_sensor(Sensor::new("Hall", SensorType::Motion))
            .unwrap();

        let mut sensors: Vec<_> = repo.get_sensors().unwrap().into_iter().collect();
        sensors[0].set_active(true);

        assert!(!repo.get_sensors().unwrap().iter().any(Sensor::is_active));
    }
}
