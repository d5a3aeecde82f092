//! Demo analytics data
//!
//! Static series shown on the dashboard until real posture history exists.

use crate::posture::PostureStatus;
use serde::{Deserialize, Serialize};

/// One hour of today's monitoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyScore {
    /// "HH:MM"
    pub time: String,
    /// Percent of the hour spent in good posture
    pub good: u32,
    pub poor: u32,
    pub score: u32,
}

/// One day of the current week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyScore {
    pub day: String,
    pub score: u32,
    pub sessions: u32,
}

/// Entry of the recent activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub time: String,
    pub kind: PostureStatus,
    pub message: String,
}

const HOURLY: [(&str, u32); 8] = [
    ("09:00", 85),
    ("10:00", 92),
    ("11:00", 78),
    ("12:00", 95),
    ("13:00", 88),
    ("14:00", 75),
    ("15:00", 82),
    ("16:00", 90),
];

const WEEKLY: [(&str, u32, u32); 7] = [
    ("Mon", 87, 8),
    ("Tue", 92, 7),
    ("Wed", 78, 9),
    ("Thu", 85, 6),
    ("Fri", 91, 8),
    ("Sat", 83, 4),
    ("Sun", 76, 3),
];

const ACTIVITY: [(&str, PostureStatus, &str); 5] = [
    ("14:30", PostureStatus::Good, "Great posture maintained for 45 minutes"),
    ("13:15", PostureStatus::Warning, "Slouching detected - corrected within 30 seconds"),
    ("12:00", PostureStatus::Good, "Perfect lunch break posture check"),
    ("10:45", PostureStatus::Bad, "Poor posture alert - leaning forward"),
    ("09:30", PostureStatus::Good, "Session started with excellent posture"),
];

pub fn hourly_scores() -> Vec<HourlyScore> {
    HOURLY
        .iter()
        .map(|&(time, score)| HourlyScore {
            time: time.to_string(),
            good: score,
            poor: 100 - score,
            score,
        })
        .collect()
}

pub fn weekly_scores() -> Vec<DailyScore> {
    WEEKLY
        .iter()
        .map(|&(day, score, sessions)| DailyScore {
            day: day.to_string(),
            score,
            sessions,
        })
        .collect()
}

/// Most recent first
pub fn recent_activity() -> Vec<Activity> {
    ACTIVITY
        .iter()
        .map(|&(time, kind, message)| Activity {
            time: time.to_string(),
            kind,
            message: message.to_string(),
        })
        .collect()
}
