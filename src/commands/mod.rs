//! Frontend command handlers
//!
//! This module contains the handlers the frontend calls for each page. They
//! return serializable views, or an `ErrorResponse` where an action can be
//! rejected.

pub mod dashboard;
pub mod navigation;
pub mod settings;
pub mod video;

use dashboard::DashboardState;
use navigation::NavigationState;
use settings::SettingsState;
use video::VideoState;

/// State shared by every command
#[derive(Default)]
pub struct AppState {
    pub video: VideoState,
    pub dashboard: DashboardState,
    pub settings: SettingsState,
    pub navigation: NavigationState,
}

impl AppState {
    pub fn new(video: VideoState) -> Self {
        Self {
            video,
            dashboard: DashboardState::default(),
            settings: SettingsState::default(),
            navigation: NavigationState::default(),
        }
    }
}
