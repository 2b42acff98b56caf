//! Status change notifications.
//!
//! Listeners are registered with the security service and called
//! synchronously, in sequence, from inside the operation that caused the
//! change.

use crate::model::AlarmStatus;
use log::{info, warn};

/// Receives alarm-status, cat-detection and sensor-status notifications.
pub trait StatusListener: Send + Sync {
    /// The alarm status was written to the repository.
    fn notify(&self, status: AlarmStatus);

    /// A camera frame was analysed. Called for every frame, changed or not.
    fn cat_detected(&self, cat_detected: bool);

    /// Part of the listener contract; the service currently has no call site.
    fn sensor_status_changed(&self) {}
}

/// Writes every notification to the log.
#[derive(Debug, Default)]
pub struct LoggingStatusListener;

impl StatusListener for LoggingStatusListener {
    fn notify(&self, status: AlarmStatus) {
        match status {
            AlarmStatus::Alarm => warn!("[Status] {} ({})", status, status.description()),
            _ => info!("[Status] {} ({})", status, status.description()),
        }
    }

    fn cat_detected(&self, cat_detected: bool) {
        if cat_detected {
            info!("[Camera] DANGER - CAT DETECTED");
        } else {
            info!("[Camera] Camera feed clear");
        }
    }

    fn sensor_status_changed(&self) {
        info!("[Sensors] Sensor status changed");
    }
}
