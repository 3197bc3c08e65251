//! eventcal CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use eventcal_core::tracing::{TracingConfig, init_tracing};

use eventcal_cli::cli::{Cli, Command, ConfigAction};
use eventcal_cli::commands;
use eventcal_cli::config::CliConfig;
use eventcal_cli::error::CliResult;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config_path: PathBuf = cli.config.clone().unwrap_or_else(CliConfig::default_path);
    let config = match cli.config {
        Some(ref path) => CliConfig::load_from(path)?,
        None => CliConfig::load()?,
    };

    match cli.command {
        Command::Build(ref args) => commands::build::run(args, &config),
        Command::ParseDate { ref raw, profile } => commands::parse_date::run(raw, profile),
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}
