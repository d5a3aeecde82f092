//! Camera session
//!
//! This module implements the live monitoring lifecycle:
//! - CameraSessionController to acquire and release the camera
//! - A status ticker that publishes posture classifications while active
//! - AlertBanner for the transient alert shown after a non-good status

pub mod alert;
pub mod controller;
pub mod state;

pub use alert::{alert_message, AlertBanner};
pub use controller::{CameraSessionController, SessionMonitor};
pub use state::{
    DetectionControls, MonitorSnapshot, SessionConfig, SessionEvent, SessionInfo, SessionState,
};
