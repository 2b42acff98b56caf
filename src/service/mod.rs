//! Security decision engine and its notification contract.

pub mod listener;
pub mod security_service;

pub use listener::{LoggingStatusListener, StatusListener};
pub use security_service::{CAT_CONFIDENCE_THRESHOLD, SecurityService};
