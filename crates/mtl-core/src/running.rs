//! In-memory state of the session currently in progress.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::window::{Window, seconds_to_minutes};

/// Whether a work session is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerStatus {
    Running,
    Stopped,
}

impl fmt::Display for TrackerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Running => "Running",
            Self::Stopped => "Stopped",
        };
        write!(f, "{s}")
    }
}

/// The open session, if any.
///
/// Running is derived from the presence of a start time, so a running state
/// without a start cannot be represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningState {
    current_session_start: Option<NaiveDateTime>,
}

impl RunningState {
    /// State for a session that started at `start`.
    pub const fn started_at(start: NaiveDateTime) -> Self {
        Self {
            current_session_start: Some(start),
        }
    }

    pub const fn is_running(&self) -> bool {
        self.current_session_start.is_some()
    }

    pub const fn current_session_start(&self) -> Option<NaiveDateTime> {
        self.current_session_start
    }

    pub const fn status(&self) -> TrackerStatus {
        if self.is_running() {
            TrackerStatus::Running
        } else {
            TrackerStatus::Stopped
        }
    }

    /// Opens a session at `now`, replacing any session already open.
    pub const fn start(&mut self, now: NaiveDateTime) {
        self.current_session_start = Some(now);
    }

    pub const fn stop(&mut self) {
        self.current_session_start = None;
    }

    /// Minutes the open session adds to `window` at `now`.
    ///
    /// Today counts the whole open session even if it began before midnight.
    /// Other windows count it only if it began inside the window.
    pub fn live_minutes(&self, window: Window, now: NaiveDateTime) -> i64 {
        let Some(start) = self.current_session_start else {
            return 0;
        };
        if window != Window::Today && start < window.start(now) {
            return 0;
        }
        seconds_to_minutes((now - start).num_seconds().max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 12)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_default_is_stopped() {
        let state = RunningState::default();
        assert!(!state.is_running());
        assert_eq!(state.current_session_start(), None);
        assert_eq!(state.status(), TrackerStatus::Stopped);
    }

    #[test]
    fn test_start_and_stop_toggle_state() {
        let mut state = RunningState::default();
        state.start(now());
        assert!(state.is_running());
        assert_eq!(state.current_session_start(), Some(now()));

        state.stop();
        assert!(!state.is_running());
        assert_eq!(state.current_session_start(), None);
    }

    #[test]
    fn test_live_minutes_floor_partial_minutes() {
        let state = RunningState::started_at(now() - Duration::seconds(90));
        assert_eq!(state.live_minutes(Window::Today, now()), 1);
    }

    #[test]
    fn test_live_minutes_zero_when_stopped() {
        assert_eq!(RunningState::default().live_minutes(Window::Today, now()), 0);
        assert_eq!(RunningState::default().live_minutes(Window::Week, now()), 0);
    }

    #[test]
    fn test_today_counts_session_started_before_midnight() {
        let state = RunningState::started_at(now() - Duration::hours(16));
        assert_eq!(state.live_minutes(Window::Today, now()), 16 * 60);
    }

    #[test]
    fn test_week_ignores_session_started_last_week() {
        let state = RunningState::started_at(now() - Duration::days(3));
        assert_eq!(state.live_minutes(Window::Week, now()), 0);
    }

    #[test]
    fn test_week_counts_session_started_exactly_at_week_start() {
        let week_start = Window::Week.start(now());
        let state = RunningState::started_at(week_start);
        assert_eq!(state.live_minutes(Window::Week, now()), 2 * 24 * 60 + 14 * 60);
    }

    #[test]
    fn test_clock_running_backwards_gives_zero() {
        let state = RunningState::started_at(now() + Duration::minutes(5));
        assert_eq!(state.live_minutes(Window::Today, now()), 0);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TrackerStatus::Running.to_string(), "Running");
        assert_eq!(TrackerStatus::Stopped.to_string(), "Stopped");
    }
}
