//! Configuration commands.

use std::path::Path;

use crate::config::CliConfig;
use crate::error::CliResult;

/// Dump the current configuration to stdout.
pub fn dump(config: &CliConfig, path: &Path) -> CliResult<()> {
    let toml_str = config.to_toml()?;
    println!("# config.toml ({})", path.display());
    println!("{}", toml_str);
    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &CliConfig) -> CliResult<()> {
    config.validate()?;
    println!(
        "Configuration is valid ({} sources, formats: {}).",
        config.sources.len(),
        config
            .output
            .formats
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> CliResult<()> {
    let state = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("config: {}{}", path.display(), state);
    Ok(())
}
