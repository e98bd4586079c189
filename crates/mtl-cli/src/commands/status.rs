//! Status command showing today's and this week's totals.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;

use mtl_core::{ActionLog, Tracker, TrackerStatus, WeekSummary, format_duration};

/// Everything shown by `mtl status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub today_minutes: i64,
    pub week: WeekSummary,
    pub status: TrackerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_start: Option<NaiveDateTime>,
}

impl Summary {
    /// Queries the tracker at `now`.
    pub fn collect<L: ActionLog>(tracker: &Tracker<L>, now: NaiveDateTime) -> Self {
        Self {
            today_minutes: tracker.today_total_minutes(now),
            week: tracker.week_summary(now),
            status: tracker.current_state(),
            session_start: tracker.running_state().current_session_start(),
        }
    }
}

/// Renders the summary as the three status lines.
pub fn format_summary(summary: &Summary) -> String {
    format!(
        "Today's Work: {}\nThis Week's Work: {} ({}/day)\nStatus: {}\n",
        format_duration(summary.today_minutes),
        format_duration(summary.week.total_minutes),
        format_duration(summary.week.per_day_minutes),
        summary.status,
    )
}

pub fn format_summary_json(summary: &Summary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

pub fn run<W: Write, L: ActionLog>(
    writer: &mut W,
    tracker: &Tracker<L>,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let summary = Summary::collect(tracker, now);
    if json {
        writeln!(writer, "{}", format_summary_json(&summary)?)?;
    } else {
        write!(writer, "{}", format_summary(&summary))?;
    }
    Ok(())
}
