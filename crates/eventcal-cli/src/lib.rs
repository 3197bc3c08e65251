//! CLI, configuration and the calendar build commands
//!
//! This crate provides the `eventcal` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
