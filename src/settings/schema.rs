//! Settings schema
//!
//! Every preference on the settings page lives in one [`Settings`] value.
//! [`Settings::defaults`] is the single source of the default values used by
//! "Reset to Defaults".

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a settings value is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("{field} must be a multiple of {step} from {min}, got {value}")]
    OffStep {
        field: &'static str,
        value: u32,
        min: u32,
        step: u32,
    },
}

/// Bounds of a slider control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl SliderRange {
    pub const fn new(min: u32, max: u32, step: u32) -> Self {
        Self { min, max, step }
    }

    /// Check `value` against the slider bounds and step
    pub fn check(&self, field: &'static str, value: u32) -> Result<(), SettingsError> {
        if value < self.min || value > self.max {
            return Err(SettingsError::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        if (value - self.min) % self.step != 0 {
            return Err(SettingsError::OffStep {
                field,
                value,
                min: self.min,
                step: self.step,
            });
        }
        Ok(())
    }
}

/// Alert delay in seconds
pub const ALERT_DELAY_RANGE: SliderRange = SliderRange::new(1, 10, 1);

/// Detection sensitivity in percent
pub const SENSITIVITY_RANGE: SliderRange = SliderRange::new(25, 100, 5);

/// Minimum detection time in seconds
pub const MIN_DETECTION_TIME_RANGE: SliderRange = SliderRange::new(1, 10, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStyle {
    #[default]
    Minimal,
    Standard,
    Detailed,
}

/// How the system learns the user's ideal posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalibrationMode {
    #[default]
    Automatic,
    Manual,
    Guided,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DataRetention {
    #[serde(rename = "7days")]
    SevenDays,
    #[default]
    #[serde(rename = "30days")]
    ThirtyDays,
    #[serde(rename = "90days")]
    NinetyDays,
    #[serde(rename = "1year")]
    OneYear,
}

impl DataRetention {
    pub fn days(&self) -> u32 {
        match self {
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
            Self::NinetyDays => 90,
            Self::OneYear => 365,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Interval of session reminders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionReminder {
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[default]
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[serde(rename = "1hour")]
    Hourly,
    #[serde(rename = "disabled")]
    Disabled,
}

impl SessionReminder {
    pub fn minutes(&self) -> Option<u32> {
        match self {
            Self::FifteenMinutes => Some(15),
            Self::ThirtyMinutes => Some(30),
            Self::Hourly => Some(60),
            Self::Disabled => None,
        }
    }
}

/// Interval of break reminders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BreakReminder {
    #[serde(rename = "1hour")]
    Hourly,
    #[default]
    #[serde(rename = "2hours")]
    TwoHours,
    #[serde(rename = "4hours")]
    FourHours,
    #[serde(rename = "disabled")]
    Disabled,
}

impl BreakReminder {
    pub fn hours(&self) -> Option<u32> {
        match self {
            Self::Hourly => Some(1),
            Self::TwoHours => Some(2),
            Self::FourHours => Some(4),
            Self::Disabled => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPreferences {
    pub visual_alerts: bool,
    pub audio_alerts: bool,
    pub vibration_alerts: bool,
    /// Seconds
    pub alert_delay: u32,
    pub notification_style: NotificationStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSettings {
    /// Percent; higher detects smaller deviations
    pub sensitivity: u32,
    /// Seconds poor posture must persist before alerting
    pub min_detection_time: u32,
    pub calibration_mode: CalibrationMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    pub data_collection: bool,
    pub camera_access: bool,
    pub anonymous_reporting: bool,
    pub data_retention: DataRetention,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceSettings {
    pub theme: Theme,
    pub session_reminders: SessionReminder,
    pub break_reminders: BreakReminder,
}

/// All user preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub alerts: AlertPreferences,
    pub detection: DetectionSettings,
    pub privacy: PrivacySettings,
    pub appearance: AppearanceSettings,
}

impl Settings {
    pub fn defaults() -> Self {
        Self {
            alerts: AlertPreferences {
                visual_alerts: true,
                audio_alerts: false,
                vibration_alerts: true,
                alert_delay: 3,
                notification_style: NotificationStyle::Minimal,
            },
            detection: DetectionSettings {
                sensitivity: 75,
                min_detection_time: 2,
                calibration_mode: CalibrationMode::Automatic,
            },
            privacy: PrivacySettings {
                data_collection: true,
                camera_access: true,
                anonymous_reporting: true,
                data_retention: DataRetention::ThirtyDays,
            },
            appearance: AppearanceSettings {
                theme: Theme::System,
                session_reminders: SessionReminder::ThirtyMinutes,
                break_reminders: BreakReminder::TwoHours,
            },
        }
    }

    /// Check every slider value
    pub fn validate(&self) -> Result<(), SettingsError> {
        ALERT_DELAY_RANGE.check("alertDelay", self.alerts.alert_delay)?;
        SENSITIVITY_RANGE.check("sensitivity", self.detection.sensitivity)?;
        MIN_DETECTION_TIME_RANGE.check("minDetectionTime", self.detection.min_detection_time)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults()
    }
}
