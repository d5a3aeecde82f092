//! Analytics dashboard
//!
//! Builds the dashboard page from static demo data.

pub mod data;
pub mod view;

pub use data::{Activity, DailyScore, HourlyScore};
pub use view::{ChartSummary, DashboardView, ScoreBadge, StatCard, Timeframe};
