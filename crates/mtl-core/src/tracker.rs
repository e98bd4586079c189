//! The tracker ties the log, the running state and the windows together.
//!
//! Queries always re-read the whole log. Query paths never fail: an
//! unreadable log is reported through `tracing` and treated as empty.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::record::{ActionKind, ActionRecord, decode_log};
use crate::running::{RunningState, TrackerStatus};
use crate::session::{Accumulation, accumulate};
use crate::window::{TimeRange, Window, elapsed_workdays, per_day};

/// Storage for the action log.
///
/// This trait lets the tracker work with a file on disk or an in-memory
/// buffer in tests.
pub trait ActionLog {
    type Error: std::error::Error;

    /// Returns the whole log, or `None` if it does not exist yet.
    fn read_all(&self) -> Result<Option<String>, Self::Error>;

    /// Appends one already encoded line.
    fn append_line(&self, line: &str) -> Result<(), Self::Error>;
}

/// Totals for the current week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub total_minutes: i64,
    pub per_day_minutes: i64,
    pub elapsed_workdays: u32,
}

/// Owns the running state and the log it mirrors.
#[derive(Debug)]
pub struct Tracker<L> {
    log: L,
    state: RunningState,
    workdays_per_week: u32,
}

impl<L: ActionLog> Tracker<L> {
    /// Creates a tracker with no session in progress.
    pub fn new(log: L, workdays_per_week: u32) -> Self {
        Self {
            log,
            state: RunningState::default(),
            workdays_per_week,
        }
    }

    /// Creates a tracker whose running state mirrors the log's trailing open session.
    pub fn restore(log: L, workdays_per_week: u32) -> Self {
        let mut tracker = Self::new(log, workdays_per_week);
        if let Some(start) = tracker.scan(TimeRange::unbounded()).open_start {
            tracing::debug!(%start, "restored open session from log");
            tracker.state = RunningState::started_at(start);
        }
        tracker
    }

    pub const fn log(&self) -> &L {
        &self.log
    }

    pub const fn running_state(&self) -> RunningState {
        self.state
    }

    pub const fn current_state(&self) -> TrackerStatus {
        self.state.status()
    }

    /// Appends an action to the log and updates the running state.
    ///
    /// The running state changes even if the append fails, so the log and
    /// the in-memory state can disagree until the next successful append.
    pub fn record_action(&mut self, kind: ActionKind, now: NaiveDateTime) -> Result<(), L::Error> {
        let line = ActionRecord::new(now, kind).encode();
        let appended = self.log.append_line(&line);

        match kind {
            ActionKind::Start => {
                if let Some(previous) = self.state.current_session_start() {
                    tracing::warn!(%previous, "session already running, restarting it");
                }
                self.state.start(now);
            }
            ActionKind::Stop => self.state.stop(),
        }

        match &appended {
            Ok(()) => tracing::info!(%kind, timestamp = %now, "recorded action"),
            Err(error) => tracing::error!(%kind, %error, "failed to append action to log"),
        }
        appended
    }

    /// Pairs the logged sessions that fall inside `range`.
    pub fn scan(&self, range: TimeRange) -> Accumulation {
        let text = match self.log.read_all() {
            Ok(text) => text.unwrap_or_default(),
            Err(error) => {
                tracing::warn!(%error, "failed to read log, treating it as empty");
                String::new()
            }
        };
        let decoded = decode_log(&text);
        if decoded.malformed > 0 {
            tracing::debug!(malformed = decoded.malformed, "skipped malformed log lines");
        }
        accumulate(&decoded.records, range)
    }

    /// Logged minutes in `window` plus the open session's live minutes.
    pub fn window_total_minutes(&self, window: Window, now: NaiveDateTime) -> i64 {
        let logged = self.scan(window.range(now)).total_minutes();
        logged + self.state.live_minutes(window, now)
    }

    pub fn today_total_minutes(&self, now: NaiveDateTime) -> i64 {
        self.window_total_minutes(Window::Today, now)
    }

    pub fn week_summary(&self, now: NaiveDateTime) -> WeekSummary {
        let total_minutes = self.window_total_minutes(Window::Week, now);
        WeekSummary {
            total_minutes,
            per_day_minutes: per_day(total_minutes, now, self.workdays_per_week),
            elapsed_workdays: elapsed_workdays(now, self.workdays_per_week),
        }
    }
}
