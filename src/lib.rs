//! Catpoint home security library.
//!
//! This library provides the alarm decision engine together with the
//! storage, image-analysis and notification collaborators it is built from.

pub mod config;
pub mod data;
pub mod error;
pub mod image;
pub mod model;
pub mod service;
pub mod simulation;

pub use error::{Result, SecurityError};
pub use model::{AlarmStatus, ArmingStatus, Sensor, SensorType};
pub use service::{SecurityService, StatusListener};
