//! Domain model for the security system.
//!
//! Sensors are the only entities with identity; alarm and arming status are
//! single global values owned by the repository.

pub mod sensor;
pub mod status;

pub use sensor::{Sensor, SensorType};
pub use status::{AlarmStatus, ArmingStatus};
