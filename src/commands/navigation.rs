//! Navigation commands
//!
//! Showing any page other than the video page unmounts it, which releases the
//! camera.

use super::video::{stop_camera, VideoState};
use crate::routes::{nav_links, NavLink, Route};
use crate::utils::{AppError, ErrorResponse};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Current location of the app
pub struct NavigationState {
    pub location: RwLock<String>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            location: RwLock::new("/".to_string()),
        }
    }
}

/// Page currently shown, with the navigation bar
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub route: Route,
    pub title: String,
    pub location: String,
    pub nav: Vec<NavLink>,
}

fn page_info(location: &str) -> PageInfo {
    let route = Route::from_path(location);
    PageInfo {
        route,
        title: route.title().to_string(),
        location: location.to_string(),
        nav: nav_links(location),
    }
}

/// Get the page currently shown
pub async fn current_page(state: &NavigationState) -> PageInfo {
    page_info(&state.location.read())
}

/// Navigate to `path`
pub async fn navigate(
    state: &NavigationState,
    video: &VideoState,
    path: String,
) -> Result<PageInfo, ErrorResponse> {
    let target = Route::from_path(&path);
    if target == Route::NotFound {
        tracing::warn!("Attempted to navigate to unknown path: {}", path);
        return Err(AppError::Navigation(format!("No page at {path}")).into());
    }

    // Stop is idempotent and waits out a pending start, so a camera started
    // while another page was shown is released too
    if target != Route::Video {
        stop_camera(video).await;
    }

    *state.location.write() = path.clone();
    tracing::debug!("Navigated to {}", path);
    Ok(page_info(&path))
}
