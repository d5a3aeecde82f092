//! Settings form state
//!
//! The page edits a draft; "Save Changes" commits it and "Reset to Defaults"
//! restores [`Settings::defaults`]. Nothing is written to disk.

use super::schema::{Settings, SettingsError};
use serde::{Deserialize, Serialize};

/// Short notification shown after a form action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
}

impl Toast {
    fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    draft: Settings,
    saved: Settings,
}

impl SettingsForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values currently shown on the page
    pub fn draft(&self) -> &Settings {
        &self.draft
    }

    /// Last committed values
    pub fn saved(&self) -> &Settings {
        &self.saved
    }

    /// Whether the draft differs from the last save
    pub fn is_dirty(&self) -> bool {
        self.draft != self.saved
    }

    /// Replace the draft, rejecting invalid slider values
    pub fn update(&mut self, settings: Settings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.draft = settings;
        Ok(())
    }

    /// Apply a change to a copy of the draft, keeping it only if valid
    pub fn edit<F>(&mut self, change: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut Settings),
    {
        let mut next = self.draft.clone();
        change(&mut next);
        self.update(next)
    }

    /// Commit the draft
    pub fn save(&mut self) -> Toast {
        self.saved = self.draft.clone();
        tracing::info!("Settings saved");
        Toast::new(
            "Settings Saved",
            "Your preferences have been successfully updated.",
        )
    }

    /// Restore the defaults in the draft
    pub fn reset(&mut self) -> Toast {
        self.draft = Settings::defaults();
        tracing::info!("Settings reset to defaults");
        Toast::new(
            "Settings Reset",
            "All settings have been restored to default values.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::schema::{CalibrationMode, Theme};

    #[test]
    fn test_edit_save_reset() {
        let mut form = SettingsForm::new();
        assert!(!form.is_dirty());

        form.edit(|s| {
            s.detection.sensitivity = 90;
            s.detection.calibration_mode = CalibrationMode::Guided;
            s.appearance.theme = Theme::Dark;
        })
        .unwrap();
        assert!(form.is_dirty());

        let toast = form.save();
        assert_eq!(toast.title, "Settings Saved");
        assert!(!form.is_dirty());
        assert_eq!(form.saved().detection.sensitivity, 90);

        let toast = form.reset();
        assert_eq!(toast.title, "Settings Reset");
        assert_eq!(form.draft(), &Settings::defaults());
        // Reset only touches the draft until saved
        assert!(form.is_dirty());
        assert_eq!(form.saved().appearance.theme, Theme::Dark);
    }

    #[test]
    fn test_invalid_edit_keeps_draft() {
        let mut form = SettingsForm::new();
        let result = form.edit(|s| s.alerts.alert_delay = 42);

        assert!(matches!(result, Err(SettingsError::OutOfRange { .. })));
        assert_eq!(form.draft().alerts.alert_delay, 3);
        assert!(!form.is_dirty());
    }
}
