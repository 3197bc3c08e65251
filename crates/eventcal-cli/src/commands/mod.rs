//! Subcommand implementations.

pub mod build;
pub mod config;
pub mod parse_date;
