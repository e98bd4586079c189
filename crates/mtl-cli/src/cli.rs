//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Work time log.
///
/// Records when work starts and stops in a plain text log and reports the
/// time worked today and this week.
#[derive(Debug, Parser)]
#[command(name = "mtl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record that work started now.
    Start,

    /// Record that work stopped now.
    Stop,

    /// Show today's and this week's totals.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Keep showing the totals, refreshing periodically until Ctrl-C.
    Watch {
        /// Seconds between refreshes.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },

    /// Print the path of the log file.
    Log,

    /// Open the log file in the default viewer.
    Open,
}
