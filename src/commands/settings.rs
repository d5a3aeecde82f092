//! Settings commands

use crate::settings::{Settings, SettingsForm, Toast};
use crate::utils::{AppError, ErrorResponse};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Application state for the settings page
#[derive(Default)]
pub struct SettingsState {
    pub form: Mutex<SettingsForm>,
}

/// Settings page after an action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub settings: Settings,
    pub dirty: bool,
    pub toast: Option<Toast>,
}

impl SettingsResponse {
    fn from_form(form: &SettingsForm, toast: Option<Toast>) -> Self {
        Self {
            settings: form.draft().clone(),
            dirty: form.is_dirty(),
            toast,
        }
    }
}

/// Get the settings shown on the page
pub async fn get_settings(state: &SettingsState) -> SettingsResponse {
    let form = state.form.lock().await;
    SettingsResponse::from_form(&form, None)
}

/// Replace the draft settings
pub async fn update_settings(
    state: &SettingsState,
    settings: Settings,
) -> Result<SettingsResponse, ErrorResponse> {
    let mut form = state.form.lock().await;
    form.update(settings).map_err(|e| {
        tracing::warn!("Rejected settings update: {}", e);
        AppError::from(e)
    })?;
    Ok(SettingsResponse::from_form(&form, None))
}

/// Commit the draft
pub async fn save_settings(state: &SettingsState) -> SettingsResponse {
    let mut form = state.form.lock().await;
    let toast = form.save();
    SettingsResponse::from_form(&form, Some(toast))
}

/// Restore defaults
pub async fn reset_settings(state: &SettingsState) -> SettingsResponse {
    let mut form = state.form.lock().await;
    let toast = form.reset();
    SettingsResponse::from_form(&form, Some(toast))
}
