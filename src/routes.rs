//! In-app navigation
//!
//! The three pages and the matching rules of the navigation bar.

use serde::{Deserialize, Serialize};

/// A page of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Dashboard,
    Video,
    Settings,
    NotFound,
}

/// Order of the links in the navigation bar
pub const NAV_ITEMS: [Route; 3] = [Route::Video, Route::Dashboard, Route::Settings];

impl Route {
    /// Resolve a location to a page
    ///
    /// Uses the same rule as link highlighting, so a location resolves to
    /// exactly the page whose link is active there.
    pub fn from_path(path: &str) -> Self {
        NAV_ITEMS
            .iter()
            .copied()
            .find(|route| route.is_active(path))
            .unwrap_or(Self::NotFound)
    }

    /// Canonical path, None for NotFound
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Self::Dashboard => Some("/"),
            Self::Video => Some("/video"),
            Self::Settings => Some("/settings"),
            Self::NotFound => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Video => "Video",
            Self::Settings => "Settings",
            Self::NotFound => "Not Found",
        }
    }

    /// Whether the link to `self` is highlighted at `location`
    ///
    /// The root link only matches exactly; other links also match sub-paths.
    pub fn is_active(&self, location: &str) -> bool {
        let Some(target) = self.path() else {
            return false;
        };
        let location = normalize(location);

        if target == "/" {
            return location == "/";
        }
        location == target || location.starts_with(&format!("{target}/"))
    }
}

/// Strip query, fragment and trailing slashes
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// One link of the navigation bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub title: String,
    pub to: String,
    pub active: bool,
}

/// Navigation bar state at `location`
pub fn nav_links(location: &str) -> Vec<NavLink> {
    NAV_ITEMS
        .iter()
        .filter_map(|route| {
            route.path().map(|to| NavLink {
                title: route.title().to_string(),
                to: to.to_string(),
                active: route.is_active(location),
            })
        })
        .collect()
}
