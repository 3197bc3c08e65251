//! `build`: read sources, assemble the calendar, write exports.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;

use chrono::Local;
use eventcal_core::{
    CalendarIndex, DateResolver, EventNormalizer, OutputFormat, Pipeline, ReportOptions,
    RunReport, format_summary, write_to,
};
use eventcal_sources::SourceSpec;
use tracing::{debug, info};

use crate::cli::BuildArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Everything a build needs, after merging flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildPlan {
    pub sources: Vec<SourceSpec>,
    pub formats: Vec<OutputFormat>,
    pub output_dir: PathBuf,
    pub basename: String,
    pub title: String,
    pub min_title_length: usize,
    pub to_stdout: bool,
}

impl BuildPlan {
    /// Merges command-line flags over `config`.
    ///
    /// Sources named on the command line are added after the configured ones;
    /// every other flag replaces its config value.
    pub fn new(args: &BuildArgs, config: &CliConfig) -> CliResult<Self> {
        let mut sources = config.sources.clone();
        sources.extend(args.sources());
        if sources.is_empty() {
            return Err(CliError::NoSources);
        }

        let formats = if args.formats.is_empty() {
            config.output.formats.clone()
        } else {
            args.formats.clone()
        };
        if formats.is_empty() {
            return Err(CliError::Usage("no output format selected".to_string()));
        }
        if args.stdout && formats.len() != 1 {
            return Err(CliError::Usage(format!(
                "--stdout writes exactly one format, got {}",
                formats.len()
            )));
        }

        let min_title_length = args
            .min_title_length
            .unwrap_or(config.normalize.min_title_length);
        if min_title_length == 0 {
            return Err(CliError::Usage(
                "--min-title-length must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            sources,
            formats,
            output_dir: args
                .output_dir
                .clone()
                .unwrap_or_else(|| config.output.dir.clone()),
            basename: args
                .basename
                .clone()
                .unwrap_or_else(|| config.output.basename.clone()),
            title: args
                .title
                .clone()
                .unwrap_or_else(|| config.output.title.clone()),
            min_title_length,
            to_stdout: args.stdout,
        })
    }

    pub fn normalizer(&self) -> EventNormalizer {
        EventNormalizer::new().with_min_title_length(self.min_title_length)
    }

    /// Report options stamped with the current local time.
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions::new(self.title.clone(), Local::now().naive_local())
    }
}

/// Reads every source and runs its records through one pipeline.
///
/// A source that cannot be read aborts the build; bad records inside a
/// readable source are only counted.
pub fn assemble(
    sources: &[SourceSpec],
    normalizer: EventNormalizer,
) -> CliResult<(CalendarIndex, RunReport)> {
    let mut pipeline = Pipeline::new(normalizer);
    for spec in sources {
        let source = spec.open();
        let records = source.records()?;
        let before = *pipeline.report();
        pipeline.ingest(&DateResolver::new(source.profile()), records);

        let after = pipeline.report();
        info!(
            source = source.name(),
            profile = %source.profile(),
            received = after.received - before.received,
            accepted = after.accepted - before.accepted,
            "ingested source"
        );
    }
    Ok(pipeline.finish())
}

/// Writes one file per format into `plan.output_dir`, returning the paths.
pub fn write_outputs(
    index: &CalendarIndex,
    plan: &BuildPlan,
    options: &ReportOptions,
) -> CliResult<Vec<PathBuf>> {
    fs::create_dir_all(&plan.output_dir)?;

    let mut written = Vec::with_capacity(plan.formats.len());
    for format in &plan.formats {
        let path = plan.output_dir.join(format.file_name(&plan.basename));
        let file = File::create(&path)?;
        write_to(*format, index, BufWriter::new(file), options)?;
        debug!(path = %path.display(), %format, "wrote export");
        written.push(path);
    }
    Ok(written)
}

/// One-line run totals.
pub fn report_line(report: &RunReport) -> String {
    format!(
        "processed {}, skipped {} ({} duplicates merged)",
        report.processed(),
        report.skipped(),
        report.duplicates
    )
}

/// Runs the `build` command.
pub fn run(args: &BuildArgs, config: &CliConfig) -> CliResult<()> {
    let plan = BuildPlan::new(args, config)?;
    let (index, report) = assemble(&plan.sources, plan.normalizer())?;
    let options = plan.report_options();

    if plan.to_stdout {
        let stdout = io::stdout();
        write_to(plan.formats[0], &index, stdout.lock(), &options)?;
        eprintln!("{}", report_line(&report));
        return Ok(());
    }

    let written = write_outputs(&index, &plan, &options)?;
    print!("{}", format_summary(&index, &plan.title));
    println!("{}", report_line(&report));
    for path in written {
        println!("wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventcal_core::Month;

    fn args_with_roster() -> BuildArgs {
        BuildArgs {
            roster: vec![PathBuf::from("swamis.csv")],
            ..Default::default()
        }
    }

    mod plan {
        use super::*;

        #[test]
        fn requires_a_source() {
            let err = BuildPlan::new(&BuildArgs::default(), &CliConfig::default()).unwrap_err();
            assert!(matches!(err, CliError::NoSources));
        }

        #[test]
        fn falls_back_to_config() {
            let plan = BuildPlan::new(&args_with_roster(), &CliConfig::default()).unwrap();
            assert_eq!(
                plan.formats,
                vec![OutputFormat::Json, OutputFormat::Csv, OutputFormat::Summary]
            );
            assert_eq!(plan.basename, "event_calendar");
            assert_eq!(plan.output_dir, PathBuf::from("."));
            assert_eq!(plan.min_title_length, 4);
        }

        #[test]
        fn flags_override_config() {
            let args = BuildArgs {
                formats: vec![OutputFormat::Html],
                basename: Some("maharaj_days".into()),
                min_title_length: Some(6),
                ..args_with_roster()
            };
            let plan = BuildPlan::new(&args, &CliConfig::default()).unwrap();
            assert_eq!(plan.formats, vec![OutputFormat::Html]);
            assert_eq!(plan.basename, "maharaj_days");
            assert_eq!(plan.normalizer().min_title_length(), 6);
        }

        #[test]
        fn cli_sources_follow_configured_ones() {
            let config = CliConfig {
                sources: vec![SourceSpec::table("national.csv")],
                ..Default::default()
            };
            let plan = BuildPlan::new(&args_with_roster(), &config).unwrap();
            assert_eq!(
                plan.sources,
                vec![
                    SourceSpec::table("national.csv"),
                    SourceSpec::roster("swamis.csv")
                ]
            );
        }

        #[test]
        fn stdout_needs_one_format() {
            let args = BuildArgs {
                stdout: true,
                ..args_with_roster()
            };
            assert!(matches!(
                BuildPlan::new(&args, &CliConfig::default()),
                Err(CliError::Usage(_))
            ));
        }

        #[test]
        fn rejects_zero_min_length() {
            let args = BuildArgs {
                min_title_length: Some(0),
                ..args_with_roster()
            };
            assert!(BuildPlan::new(&args, &CliConfig::default()).is_err());
        }
    }

    #[test]
    fn assemble_with_no_sources_is_empty() {
        let (index, report) = assemble(&[], EventNormalizer::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.month(Month::January).is_empty());
        assert_eq!(report, RunReport::default());
    }

    #[test]
    fn assemble_fails_on_unreadable_source() {
        let result = assemble(
            &[SourceSpec::roster("/nonexistent/swamis.csv")],
            EventNormalizer::new(),
        );
        assert!(matches!(result, Err(CliError::Source(_))));
    }

    #[test]
    fn report_line_counts() {
        let report = RunReport {
            received: 5,
            accepted: 2,
            duplicates: 1,
            skipped_unparsable: 1,
            skipped_no_date: 1,
            ..Default::default()
        };
        assert_eq!(
            report_line(&report),
            "processed 3, skipped 2 (1 duplicates merged)"
        );
    }
}
