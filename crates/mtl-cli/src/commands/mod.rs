//! CLI subcommand implementations.

pub mod log;
pub mod record;
pub mod status;
pub mod watch;
