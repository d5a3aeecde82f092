//! Dashboard view model

use super::data::{self, Activity, DailyScore, HourlyScore};
use crate::posture::BadgeVariant;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Period shown by the score chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    #[default]
    Today,
    Week,
    Month,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Self::Today, Self::Week, Self::Month];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }

    pub fn chart_title(&self) -> String {
        format!("Posture Score {}", self.label())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(format!("Unknown timeframe: {other}")),
        }
    }
}

/// Badge for a posture score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBadge {
    pub label: String,
    pub variant: BadgeVariant,
}

impl ScoreBadge {
    pub fn for_score(score: u32) -> Self {
        let (label, variant) = match score {
            s if s >= 85 => ("Excellent", BadgeVariant::Good),
            s if s >= 70 => ("Fair", BadgeVariant::Warning),
            _ => ("Poor", BadgeVariant::Bad),
        };
        Self {
            label: label.to_string(),
            variant,
        }
    }
}

/// One headline card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub caption: String,
}

/// Figures derived from the chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSummary {
    /// Mean of the hourly scores, rounded to the nearest percent
    pub mean_hourly_score: Option<u32>,

    /// Day of the week with the highest score
    pub best_day: Option<String>,

    pub total_sessions: u32,
}

impl ChartSummary {
    pub fn new(hourly: &[HourlyScore], weekly: &[DailyScore]) -> Self {
        let mean_hourly_score = (!hourly.is_empty()).then(|| {
            let total: u32 = hourly.iter().map(|h| h.score).sum();
            (total as f64 / hourly.len() as f64).round() as u32
        });

        Self {
            mean_hourly_score,
            best_day: weekly.iter().max_by_key(|d| d.score).map(|d| d.day.clone()),
            total_sessions: weekly.iter().map(|d| d.sessions).sum(),
        }
    }
}

/// Everything the dashboard page renders
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub timeframe: Timeframe,

    /// Choices of the timeframe selector, in display order
    pub timeframes: Vec<Timeframe>,

    pub chart_title: String,
    pub current_score: u32,
    pub score_badge: ScoreBadge,
    pub stats: Vec<StatCard>,
    pub hourly: Vec<HourlyScore>,
    pub weekly: Vec<DailyScore>,
    pub recent_activity: Vec<Activity>,
    pub summary: ChartSummary,
}

const CURRENT_SCORE: u32 = 87;
const HOURS_TODAY: f64 = 6.5;
const WEEKLY_AVERAGE: u32 = 85;
const ALERTS_TODAY: u32 = 12;

impl DashboardView {
    /// Demo dashboard for `timeframe`
    pub fn demo(timeframe: Timeframe) -> Self {
        let stats = vec![
            StatCard {
                title: "Current Score".to_string(),
                value: format!("{CURRENT_SCORE}%"),
                caption: ScoreBadge::for_score(CURRENT_SCORE).label,
            },
            StatCard {
                title: "Hours Today".to_string(),
                value: format!("{HOURS_TODAY}h"),
                caption: "+1.2h from yesterday".to_string(),
            },
            StatCard {
                title: "Weekly Average".to_string(),
                value: format!("{WEEKLY_AVERAGE}%"),
                caption: "\u{2191} 3% from last week".to_string(),
            },
            StatCard {
                title: "Today's Alerts".to_string(),
                value: ALERTS_TODAY.to_string(),
                caption: "-5 from yesterday".to_string(),
            },
        ];

        let hourly = data::hourly_scores();
        let weekly = data::weekly_scores();
        let summary = ChartSummary::new(&hourly, &weekly);

        Self {
            timeframe,
            timeframes: Timeframe::ALL.to_vec(),
            chart_title: timeframe.chart_title(),
            current_score: CURRENT_SCORE,
            score_badge: ScoreBadge::for_score(CURRENT_SCORE),
            stats,
            hourly,
            weekly,
            recent_activity: data::recent_activity(),
            summary,
        }
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::demo(Timeframe::default())
    }
}
