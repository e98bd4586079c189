use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mtl_cli::commands::{log, record, status, watch};
use mtl_cli::{Cli, Commands, Config};
use mtl_core::{ActionKind, Tracker};
use mtl_store::LogFile;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let log_file = LogFile::new(&config.log_path);
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Start) => {
            let mut tracker = Tracker::restore(log_file, config.workdays_per_week);
            let now = Local::now().naive_local();
            record::run(&mut stdout, &mut tracker, ActionKind::Start, now)?;
        }
        Some(Commands::Stop) => {
            let mut tracker = Tracker::restore(log_file, config.workdays_per_week);
            let now = Local::now().naive_local();
            record::run(&mut stdout, &mut tracker, ActionKind::Stop, now)?;
        }
        Some(Commands::Status { json }) => {
            let tracker = Tracker::restore(log_file, config.workdays_per_week);
            let now = Local::now().naive_local();
            status::run(&mut stdout, &tracker, now, *json)?;
        }
        Some(Commands::Watch { interval }) => {
            drop(stdout);
            watch::run(
                &log_file,
                config.workdays_per_week,
                Duration::from_secs(*interval),
            )?;
        }
        Some(Commands::Log) => {
            log::run_path(&mut stdout, log_file.path())?;
        }
        Some(Commands::Open) => {
            log::run_open(&log_file)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
