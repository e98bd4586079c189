//! Core domain logic for the work time log.
//!
//! This crate contains the fundamental types and logic for:
//! - Record codec: one start/stop action per log line
//! - Session reconstruction: pairing starts with stops inside a time range
//! - Windows: today and the current ISO week, plus the weekly average
//! - Live accounting: minutes from the session still in progress

pub mod format;
pub mod record;
pub mod running;
pub mod session;
pub mod tracker;
pub mod window;

pub use format::format_duration;
pub use record::{ActionKind, ActionRecord, DecodedLog, UnknownActionCode, decode, decode_log, encode};
pub use running::{RunningState, TrackerStatus};
pub use session::{Accumulation, accumulate};
pub use tracker::{ActionLog, Tracker, WeekSummary};
pub use window::{
    DEFAULT_WORKDAYS_PER_WEEK, InvalidWorkdays, TimeRange, Window, elapsed_workdays, per_day,
    seconds_to_minutes, validate_workdays,
};
