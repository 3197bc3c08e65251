//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eventcal_core::{DateProfile, OutputFormat};
use eventcal_sources::SourceSpec;

/// eventcal - Build a month-by-month calendar from event rosters, tables and feeds
#[derive(Debug, Parser)]
#[command(name = "eventcal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "EVENTCAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the calendar and write its exports
    Build(BuildArgs),

    /// Resolve a single date string and print the result
    ParseDate {
        /// Date as written in a source, e.g. "17 September 1945"
        raw: String,

        /// Date profile to resolve with
        #[arg(long, short, default_value_t = DateProfile::Standard)]
        profile: DateProfile,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `build`.
#[derive(Debug, Default, Args)]
pub struct BuildArgs {
    // --- Source flags ---
    /// Roster CSV with appearance/disappearance columns (can be repeated)
    #[arg(long, action = clap::ArgAction::Append)]
    pub roster: Vec<PathBuf>,

    /// Observance table CSV (can be repeated)
    #[arg(long, action = clap::ArgAction::Append)]
    pub table: Vec<PathBuf>,

    /// JSON card feed (can be repeated)
    #[arg(long, action = clap::ArgAction::Append)]
    pub feed: Vec<PathBuf>,

    // --- Output flags ---
    /// Export format: json, csv, summary, html, planner or javascript (can be repeated)
    #[arg(long = "format", short = 'f', action = clap::ArgAction::Append)]
    pub formats: Vec<OutputFormat>,

    /// Directory to write exports into
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// File name stem for exports
    #[arg(long)]
    pub basename: Option<String>,

    /// Title for the summary banner and HTML report
    #[arg(long)]
    pub title: Option<String>,

    /// Write a single format to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    // --- Normalization flags ---
    /// Drop events whose cleaned title is shorter than this
    #[arg(long)]
    pub min_title_length: Option<usize>,
}

impl BuildArgs {
    /// Sources named on the command line, rosters first.
    pub fn sources(&self) -> Vec<SourceSpec> {
        let rosters = self.roster.iter().map(SourceSpec::roster);
        let tables = self.table.iter().map(SourceSpec::table);
        let feeds = self.feed.iter().map(SourceSpec::feed);
        rosters.chain(tables).chain(feeds).collect()
    }
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
