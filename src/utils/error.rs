//! Error types and handling
//!
//! Common error types used across the application.

use crate::capture::CaptureError;
use crate::settings::SettingsError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Camera error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Error response for frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        let code = match &error {
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Capture(CaptureError::DeviceUnavailable(_)) => "DEVICE_UNAVAILABLE",
            AppError::Settings(_) => "SETTINGS_ERROR",
            AppError::Navigation(_) => "NAVIGATION_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
        };

        ErrorResponse {
            code: code.to_string(),
            message: error.to_string(),
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
