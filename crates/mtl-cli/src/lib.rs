//! Work time log CLI library.
//!
//! This crate provides the CLI interface for the work time log.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
