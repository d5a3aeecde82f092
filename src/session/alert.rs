//! Alert banner visibility
//!
//! The banner is shown for a fixed window after a qualifying status. A new
//! trigger restarts the window from the trigger instant; alerts never stack.

use crate::posture::PostureStatus;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct AlertBanner {
    window: Duration,
    shown: Option<(PostureStatus, Instant)>,
}

impl AlertBanner {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            shown: None,
        }
    }

    /// Show the banner for `status`, restarting the window at `now`
    pub fn trigger(&mut self, status: PostureStatus, now: Instant) {
        self.shown = Some((status, now));
    }

    /// Instant at which the banner hides, if it is showing
    pub fn deadline(&self) -> Option<Instant> {
        self.shown.map(|(_, at)| at + self.window)
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.deadline().map(|deadline| now < deadline).unwrap_or(false)
    }

    /// Status the banner is currently reporting
    pub fn status(&self) -> Option<PostureStatus> {
        self.shown.map(|(status, _)| status)
    }

    /// Hide immediately. Returns whether the banner was showing.
    pub fn hide(&mut self) -> bool {
        self.shown.take().is_some()
    }

    /// Hide if the window has elapsed at `now`. Returns whether it hid.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.hide(),
            _ => false,
        }
    }

    /// Banner text for the current alert
    pub fn message(&self) -> Option<String> {
        self.status().map(alert_message)
    }
}

/// Text of the banner for a given status
pub fn alert_message(status: PostureStatus) -> String {
    format!("Posture Alert: {}", status.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(3);

    #[test]
    fn test_hidden_by_default() {
        let banner = AlertBanner::new(WINDOW);
        assert!(!banner.is_visible(Instant::now()));
        assert!(banner.deadline().is_none());
        assert!(banner.message().is_none());
    }

    #[test]
    fn test_visible_for_exact_window() {
        let start = Instant::now();
        let mut banner = AlertBanner::new(WINDOW);
        banner.trigger(PostureStatus::Bad, start);

        assert!(banner.is_visible(start));
        assert!(banner.is_visible(start + Duration::from_millis(2999)));
        assert!(!banner.is_visible(start + WINDOW));
        assert_eq!(banner.message().as_deref(), Some("Posture Alert: Poor Posture"));
    }

    #[test]
    fn test_retrigger_resets_window() {
        let start = Instant::now();
        let mut banner = AlertBanner::new(WINDOW);
        banner.trigger(PostureStatus::Warning, start);
        banner.trigger(PostureStatus::Bad, start + Duration::from_secs(2));

        // Reset, not extended: 2s + 3s, not 3s + 3s
        assert_eq!(banner.deadline(), Some(start + Duration::from_secs(5)));
        assert!(banner.is_visible(start + Duration::from_millis(4500)));
        assert!(!banner.is_visible(start + Duration::from_secs(5)));
        assert_eq!(banner.status(), Some(PostureStatus::Bad));
    }

    #[test]
    fn test_expire() {
        let start = Instant::now();
        let mut banner = AlertBanner::new(WINDOW);
        banner.trigger(PostureStatus::Warning, start);

        assert!(!banner.expire(start + Duration::from_secs(1)));
        assert!(banner.expire(start + WINDOW));
        assert!(!banner.expire(start + WINDOW));
        assert!(!banner.hide());
    }
}
