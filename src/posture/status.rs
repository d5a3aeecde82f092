//! Posture classification

use serde::{Deserialize, Serialize};

/// Classification of the user's sitting posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostureStatus {
    #[default]
    Good,
    Warning,
    Bad,
}

impl PostureStatus {
    /// Text shown next to the live feed
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good Posture",
            Self::Warning => "Slouching Detected",
            Self::Bad => "Poor Posture",
        }
    }

    /// Whether this status should raise an alert
    pub fn needs_attention(&self) -> bool {
        !matches!(self, Self::Good)
    }

    pub fn badge(&self) -> BadgeVariant {
        match self {
            Self::Good => BadgeVariant::Good,
            Self::Warning => BadgeVariant::Warning,
            Self::Bad => BadgeVariant::Bad,
        }
    }
}

/// Visual variant of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Good,
    Warning,
    Bad,
    #[default]
    Neutral,
}
