//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/eventcal/config.toml` by default:
//!
//! ```toml
//! [output]
//! dir = "out"
//! basename = "iskcon_maharaj_days"
//! formats = ["json", "csv", "summary"]
//! title = "ISKCON Maharaj Days"
//!
//! [normalize]
//! min_title_length = 4
//!
//! [[sources]]
//! kind = "roster"
//! path = "swamisiskcon.csv"
//! ```
//!
//! Relative source paths are resolved against the directory holding the
//! config file.

use std::path::{Path, PathBuf};

use eventcal_core::{DEFAULT_MIN_TITLE_LENGTH, OutputFormat};
use eventcal_sources::SourceSpec;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

// ---------------------------------------------------------------------------
// CliConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the eventcal CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Export settings.
    pub output: OutputSettings,

    /// Title cleanup settings.
    pub normalize: NormalizeSettings,

    /// Sources always included in `build`.
    pub sources: Vec<SourceSpec>,
}

/// Where and how exports are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output directory.
    pub dir: PathBuf,

    /// File name stem shared by every export.
    pub basename: String,

    /// Formats written by `build` when no `--format` is given.
    pub formats: Vec<OutputFormat>,

    /// Title for the summary banner and the HTML report.
    pub title: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            basename: "event_calendar".to_string(),
            formats: vec![OutputFormat::Json, OutputFormat::Csv, OutputFormat::Summary],
            title: "Event Calendar".to_string(),
        }
    }
}

/// Title cleanup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeSettings {
    /// Cleaned titles shorter than this are dropped.
    pub min_title_length: usize,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            min_title_length: DEFAULT_MIN_TITLE_LENGTH,
        }
    }
}

impl CliConfig {
    /// Loads configuration from the default path, or defaults if it is absent.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let mut config = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parses configuration text.
    pub fn parse(content: &str) -> CliResult<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(format!("failed to parse config: {}", e)))
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))
    }

    /// Makes relative source paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for source in &mut self.sources {
            if source.path.is_relative() {
                source.path = base.join(&source.path);
            }
        }
    }

    /// Checks that the configuration can drive a build.
    pub fn validate(&self) -> CliResult<()> {
        if self.output.formats.is_empty() {
            return Err(CliError::Config("output.formats must not be empty".to_string()));
        }
        if self.output.basename.trim().is_empty() {
            return Err(CliError::Config("output.basename must not be empty".to_string()));
        }
        if self.normalize.min_title_length == 0 {
            return Err(CliError::Config(
                "normalize.min_title_length must be at least 1".to_string(),
            ));
        }
        if let Some(missing) = self.sources.iter().find(|s| !s.path.exists()) {
            return Err(CliError::Config(format!(
                "{} source not found: {}",
                missing.kind,
                missing.path.display()
            )));
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventcal")
    }
}
