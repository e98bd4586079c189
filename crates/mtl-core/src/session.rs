//! Session reconstruction from start/stop records.
//!
//! # Pairing
//!
//! Records are scanned in log order with a single pending-start slot:
//!
//! 1. A start inside the range replaces whatever start was pending.
//! 2. A stop inside the range closes the pending start, if any.
//! 3. Records outside the range never touch the slot.
//!
//! A start left pending at the end of the scan is an open session. It is
//! reported separately and is not part of the total.

use chrono::NaiveDateTime;

use crate::record::{ActionKind, ActionRecord};
use crate::window::{TimeRange, seconds_to_minutes};

/// Result of pairing records within a range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accumulation {
    /// Sum of closed session lengths in seconds.
    pub total_seconds: i64,
    /// Number of closed sessions that contributed.
    pub sessions: usize,
    /// Start of the trailing session that has no stop yet.
    pub open_start: Option<NaiveDateTime>,
    /// Sessions whose stop preceded their start and were counted as zero.
    pub clamped: usize,
}

impl Accumulation {
    /// Closed session time in whole minutes.
    pub const fn total_minutes(&self) -> i64 {
        seconds_to_minutes(self.total_seconds)
    }
}

/// Pairs each start with the next stop inside `range` and sums their lengths.
pub fn accumulate<'a, I>(records: I, range: TimeRange) -> Accumulation
where
    I: IntoIterator<Item = &'a ActionRecord>,
{
    let mut result = Accumulation::default();
    let mut pending: Option<NaiveDateTime> = None;

    for record in records {
        if !range.contains(record.timestamp) {
            continue;
        }

        match record.kind {
            ActionKind::Start => pending = Some(record.timestamp),
            ActionKind::Stop => {
                let Some(start) = pending.take() else {
                    continue;
                };
                let seconds = (record.timestamp - start).num_seconds();
                if seconds < 0 {
                    tracing::warn!(
                        %start,
                        stop = %record.timestamp,
                        "stop precedes its start, counting session as zero"
                    );
                    result.clamped += 1;
                } else {
                    result.total_seconds += seconds;
                }
                result.sessions += 1;
            }
        }
    }

    result.open_start = pending;
    result
}
