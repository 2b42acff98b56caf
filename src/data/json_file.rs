//! File-backed repository.
//!
//! The whole [`SecurityState`] is written as pretty JSON after every
//! mutation, so the alarm controller resumes with the same sensors and
//! status after a restart.

use super::{SecurityRepository, SecurityState};
use crate::error::Result;
use crate::model::{AlarmStatus, ArmingStatus, Sensor};
use log::{debug, info};
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

impl SecurityState {
    /// Load from file. A missing file yields the default state.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read(path) {
            Ok(bytes) => {
                let state = serde_json::from_slice::<SecurityState>(&bytes)?;
                info!(
                    "Loaded {} sensors from {:?} (alarm={}, arming={})",
                    state.sensors.len(),
                    path,
                    state.alarm_status,
                    state.arming_status
                );
                Ok(state)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No security state found at {:?} (first run)", path);
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Save to file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;
        debug!("Saved security state to {:?}", path);
        Ok(())
    }
}

/// Repository that persists every change to a JSON file.
pub struct JsonFileSecurityRepository {
    path: PathBuf,
    state: RwLock<SecurityState>,
}

impl JsonFileSecurityRepository {
    /// Open the repository, loading any previously saved state.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = SecurityState::load(&path)?;
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the state and keep it only once it is on disk.
    fn modify(&self, change: impl FnOnce(&mut SecurityState)) -> Result<()> {
        let mut state = self.state.write();
        let mut next = state.clone();
        change(&mut next);
        next.save(&self.path)?;
        *state = next;
        Ok(())
    }
}

impl SecurityRepository for JsonFileSecurityRepository {
    fn add_sensor(&self, sensor: Sensor) -> Result<()> {
        self.modify(|state| state.add_sensor(sensor))
    }

    fn remove_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.modify(|state| state.remove_sensor(sensor))
    }

    fn update_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.modify(|state| state.update_sensor(sensor))
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<()> {
        self.modify(|state| state.alarm_status = status)
    }

    fn set_arming_status(&self, status: ArmingStatus) -> Result<()> {
        self.modify(|state| state.arming_status = status)
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
    use crate::error::SecurityError;
    use crate::model::SensorType;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("catpoint-test-{}", uuid::Uuid::new_v4()))
            .join("security.json")
    }

    #[test]
    fn test_missing_file_is_first_run() {
        let path = scratch_path();
        let repo = JsonFileSecurityRepository::open(&path).unwrap();
        assert_eq!(repo.get_alarm_status().unwrap(), AlarmStatus::NoAlarm);
        assert_eq!(repo.get_arming_status().unwrap(), ArmingStatus::Disarmed);
        assert!(repo.get_sensors().unwrap().is_empty());
        assert!(!path.exists());
        assert_eq!(repo.path(), path.as_path());
    }

    #[test]
    fn test_state_survives_reopen() {
        let path = scratch_path();
        {
            let repo = JsonFileSecurityRepository::open(&path).unwrap();
            repo.add_sensor(Sensor::new("Front Door", SensorType::Door))
                .unwrap();
            repo.add_sensor(Sensor::new("Hall", SensorType::Motion))
                .unwrap();
            repo.update_sensor(&Sensor::new("Hall", SensorType::Motion).with_active(true))
                .unwrap();
            repo.set_arming_status(ArmingStatus::ArmedAway).unwrap();
            repo.set_alarm_status(AlarmStatus::PendingAlarm).unwrap();
        }

        let repo = JsonFileSecurityRepository::open(&path).unwrap();
        assert_eq!(repo.get_arming_status().unwrap(), ArmingStatus::ArmedAway);
        assert_eq!(repo.get_alarm_status().unwrap(), AlarmStatus::PendingAlarm);
        let active: Vec<_> = repo
            .get_sensors()
            .unwrap()
            .into_iter()
            .filter(Sensor::is_active)
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(active, vec!["Hall".to_string()]);

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let path = scratch_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"{ not json").unwrap();

        let result = JsonFileSecurityRepository::open(&path);
        assert!(matches!(result, Err(SecurityError::SerdeJsonError(_))));

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_failed_write_leaves_state_untouched() {
        let dir = std::env::temp_dir().join(format!("catpoint-test-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        // A directory where the file should be makes every save fail.
        let path = dir.join("security.json");
        fs::create_dir_all(&path).unwrap();

        let repo = JsonFileSecurityRepository {
            path: path.clone(),
            state: RwLock::new(SecurityState::default()),
        };
        assert!(repo.set_alarm_status(AlarmStatus::Alarm).is_err());
        assert_eq!(repo.get_alarm_status().unwrap(), AlarmStatus::NoAlarm);

        fs::remove_dir_all(&dir).unwrap();
    }
}
