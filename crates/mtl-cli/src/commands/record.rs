//! Start and stop commands.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use mtl_core::{ActionKind, Tracker};
use mtl_store::LogFile;

use super::status::{Summary, format_summary};

/// Records `kind` at `now`, then prints the updated summary.
///
/// The summary is printed even when the append fails; the failure is
/// returned afterwards.
pub fn run<W: Write>(
    writer: &mut W,
    tracker: &mut Tracker<LogFile>,
    kind: ActionKind,
    now: NaiveDateTime,
) -> Result<()> {
    let appended = tracker.record_action(kind, now);

    write!(writer, "{}", format_summary(&Summary::collect(tracker, now)))?;

    appended.with_context(|| format!("failed to record {kind}"))
}
