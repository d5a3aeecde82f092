//! Dashboard commands

use crate::dashboard::{DashboardView, Timeframe};
use crate::utils::{AppError, AppResult, ErrorResponse};
use parking_lot::Mutex;

/// Application state for the dashboard page
#[derive(Default)]
pub struct DashboardState {
    pub timeframe: Mutex<Timeframe>,
}

/// Get the dashboard for the selected timeframe
pub async fn get_dashboard(state: &DashboardState) -> DashboardView {
    DashboardView::demo(*state.timeframe.lock())
}

/// Switch the score chart to another timeframe
pub async fn set_timeframe(
    state: &DashboardState,
    timeframe: String,
) -> Result<DashboardView, ErrorResponse> {
    let timeframe: Timeframe = timeframe.parse().map_err(AppError::InvalidInput)?;
    *state.timeframe.lock() = timeframe;

    tracing::debug!("Dashboard timeframe set to {:?}", timeframe);
    Ok(DashboardView::demo(timeframe))
}

/// Dashboard data as pretty JSON, for "Export Data"
pub async fn export_dashboard(state: &DashboardState) -> Result<String, ErrorResponse> {
    let view = get_dashboard(state).await;
    Ok(to_json(&view)?)
}

fn to_json(view: &DashboardView) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(view)?)
}
