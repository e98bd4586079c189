//! Watch command that keeps the summary on screen.
//!
//! Each tick re-opens the tracker from the log so that `mtl start` and
//! `mtl stop` run from other terminals show up on the next refresh.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use mtl_core::Tracker;
use mtl_store::LogFile;

use super::status::{Summary, format_summary};

/// Renders one refresh of the watch view.
pub fn render_frame(log: &LogFile, workdays_per_week: u32) -> String {
    let tracker = Tracker::restore(log.clone(), workdays_per_week);
    let now = Local::now().naive_local();
    format!(
        "{}\n(refreshing, Ctrl-C to quit)\n",
        format_summary(&Summary::collect(&tracker, now))
    )
}

/// Clears the terminal, moves the cursor home and writes `frame`.
pub fn draw_frame<W: Write>(out: &mut W, frame: &str) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    write!(out, "{frame}")?;
    out.flush()
}

/// Refreshes the summary every `interval` until Ctrl-C.
pub fn run(log: &LogFile, workdays_per_week: u32, interval: Duration) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    runtime.block_on(watch_loop(log, workdays_per_week, interval))
}

async fn watch_loop(log: &LogFile, workdays_per_week: u32, interval: Duration) -> Result<()> {
    let mut ticker = tokio::time::interval(interval);
    let mut stdout = io::stdout();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                draw_frame(&mut stdout, &render_frame(log, workdays_per_week))?;
            }
            result = &mut ctrl_c => {
                result.context("failed to listen for Ctrl-C")?;
                tracing::debug!("watch interrupted");
                return Ok(());
            }
        }
    }
}
