//! Session state management
//!
//! Defines the camera session state machine, its configuration and the
//! snapshot shared with the frontend.

use crate::capture::{Resolution, VideoConstraints};
use crate::posture::PostureStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Current state of the camera session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No stream held
    #[default]
    Idle,
    /// Streaming, status ticker running
    Active,
}

/// Information about the active session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: Uuid,

    /// Identifier of the held stream
    pub stream_id: String,

    /// Resolution delivered by the camera
    pub resolution: Resolution,

    pub started_at: DateTime<Utc>,
}

impl SessionInfo {
    pub fn new(stream_id: &str, resolution: Resolution) -> Self {
        Self {
            id: Uuid::new_v4(),
            stream_id: stream_id.to_string(),
            resolution,
            started_at: Utc::now(),
        }
    }
}

/// Detection toggles on the video page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionControls {
    /// Show the alert banner for non-good statuses
    pub alerts_enabled: bool,

    pub audio_enabled: bool,
}

impl Default for DetectionControls {
    fn default() -> Self {
        Self {
            alerts_enabled: true,
            audio_enabled: false,
        }
    }
}

/// Timing and capture configuration of a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Time between two status draws
    pub tick_period: Duration,

    /// How long the alert banner stays up
    pub alert_window: Duration,

    pub constraints: VideoConstraints,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(4),
            alert_window: Duration::from_secs(3),
            constraints: VideoConstraints::default(),
        }
    }
}

/// Point-in-time view of the controller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSnapshot {
    pub state: SessionState,

    /// Most recent classification (Good until the first tick)
    pub status: PostureStatus,

    /// Status the alert banner is showing, if visible
    pub alert: Option<PostureStatus>,

    pub controls: DetectionControls,

    pub session: Option<SessionInfo>,
}

impl MonitorSnapshot {
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }
}

/// Events emitted by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum SessionEvent {
    /// Stream acquired, ticker running
    Started,
    /// Stream released
    Stopped,
    /// New status published
    Status(PostureStatus),
    /// Alert banner shown (or its window restarted)
    AlertShown(PostureStatus),
    /// Alert banner hidden
    AlertHidden,
    /// Start failed
    Error(String),
}
