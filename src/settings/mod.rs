//! User settings
//!
//! One explicit settings struct with defaults, slider validation and the
//! form state behind the settings page.

pub mod form;
pub mod schema;

pub use form::{SettingsForm, Toast};
pub use schema::{
    AlertPreferences, AppearanceSettings, BreakReminder, CalibrationMode, DataRetention,
    DetectionSettings, NotificationStyle, PrivacySettings, SessionReminder, Settings,
    SettingsError, SliderRange, Theme,
};
