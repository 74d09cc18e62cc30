//! Ordo generation
//!
//! Runs the whole resolution for one configuration:
//! - Build the calendar definition tree (loads every artefact)
//! - Bind it to the configured year
//! - Evaluate and reduce the day tree of every date
//! - Hand the records to an outputter in chronological order
//! - Emit a run summary

use std::io;
use std::time::Instant;

use ordo_liturgy::{CalendarError, LoadError};
use thiserror::Error;
use tracing::info;

use crate::config::{Config, ConfigError, OutputFormat};
use crate::definition::{CalendarDefinition, DefinitionBuilder};
use crate::linearizer::{LinearizeError, Linearizer};
use crate::output::{ConsoleOutputter, JsonOutputter, OutputError, Outputter};
use crate::reducer::{ReduceError, TreeReducer};
use crate::summary::RunSummary;
use crate::tree::Tree;
use crate::tree_calendar::TreeCalendar;

/// Generation errors
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("configuration error: no calendar declared")]
    NoCalendar,

    #[error("configuration error: {0}")]
    Artefact(#[from] LoadError),

    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("output error: {0}")]
    Output(#[from] OutputError),

    #[error("internal error: {0}")]
    Reduce(#[from] ReduceError),

    #[error("{0}")]
    Linearize(#[from] LinearizeError),
}

impl GenerateError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerateError::Config(_) | GenerateError::NoCalendar => 1,
            GenerateError::Artefact(_) => 2,
            GenerateError::Calendar(_) => 3,
            GenerateError::Output(_) => 4,
            GenerateError::Linearize(LinearizeError::Output(_)) => 4,
            GenerateError::Linearize(LinearizeError::OutOfOrder { .. }) => 70,
            GenerateError::Reduce(_) => 70,
        }
    }
}

impl From<io::Error> for GenerateError {
    fn from(e: io::Error) -> Self {
        GenerateError::Output(OutputError::Io(e))
    }
}

/// Result type for generation
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Generates the ordo described by a configuration
pub struct Generator {
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the calendar definition tree
    pub fn definitions(&self) -> GenerateResult<Tree<CalendarDefinition>> {
        let spec = self
            .config
            .calendars
            .as_ref()
            .ok_or(GenerateError::NoCalendar)?;
        Ok(DefinitionBuilder::new().build(spec)?)
    }

    /// Resolve the whole year into `outputter`
    pub fn run<O: Outputter + ?Sized>(&self, outputter: &mut O) -> GenerateResult<RunSummary> {
        let started = Instant::now();
        let definitions = self.definitions()?;
        let calendar = TreeCalendar::bind(&definitions, self.config.year, &self.config.temporale)?;
        let reducer = TreeReducer::new();

        let mut linearizer = Linearizer::start(outputter)?;
        for days in calendar.days() {
            let record = reducer.reduce(&days?)?;
            linearizer.push(&record)?;
        }
        let stats = linearizer.finish()?;

        info!(
            year = self.config.year,
            days = stats.records,
            entries = stats.entries,
            "ordo generated"
        );

        Ok(RunSummary::new(
            self.config.title.clone(),
            self.config.year,
            self.config.output.format,
            self.config.temporale.clone(),
            self.config.sources.clone(),
            &definitions,
            stats,
            started.elapsed().as_millis() as u64,
        ))
    }

    /// Run with the configured outputter and write the run summary.
    ///
    /// The summary goes next to the JSON report, or into the output
    /// directory of a console run when one is configured.
    pub fn generate(&self) -> GenerateResult<RunSummary> {
        let output = &self.config.output;
        let summary = match output.format {
            OutputFormat::Console => {
                let stdout = io::stdout();
                let mut outputter =
                    ConsoleOutputter::new(stdout.lock(), &self.config.title, self.config.year);
                self.run(&mut outputter)?
            }
            OutputFormat::Json => {
                let mut outputter = JsonOutputter::new(
                    output.dir(),
                    &output.filename,
                    &self.config.title,
                    self.config.year,
                );
                let summary = self.run(&mut outputter)?;
                info!(path = %outputter.path().display(), "report written");
                summary
            }
        };

        if output.format == OutputFormat::Json || output.dir.is_some() {
            summary.write_to_dir(output.dir())?;
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RecordingOutputter;

    fn config(calendar: &str) -> Config {
        Config::from_str(&format!("year = 2024\n{}", calendar)).unwrap()
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(GenerateError::NoCalendar.exit_code(), 1);
        assert_eq!(
            GenerateError::Artefact(LoadError::UnknownPackagedReference("x".into())).exit_code(),
            2
        );
        assert_eq!(GenerateError::Calendar(CalendarError::InvalidYear(1)).exit_code(), 3);
        assert_eq!(
            GenerateError::Output(OutputError::Io(io::Error::other("x"))).exit_code(),
            4
        );
    }

    #[test]
    fn test_no_calendar() {
        let err = Generator::new(config("")).definitions().unwrap_err();
        assert!(matches!(err, GenerateError::NoCalendar));
    }

    #[test]
    fn test_run_covers_whole_year() {
        let generator = Generator::new(config(
            r#"
            [calendar]
            title = "General Roman Calendar"
            artefacts = [{ type = "packaged", ref = "universal-en" }]
            "#,
        ));
        let mut out = RecordingOutputter::default();
        let summary = generator.run(&mut out).unwrap();

        // 2024-12-01 ..= 2025-11-29
        assert_eq!(summary.day_count, 364);
        assert_eq!(summary.entry_count, 364);
        assert_eq!(out.events.first().map(String::as_str), Some("prepare"));
        assert_eq!(out.events.last().map(String::as_str), Some("finish"));
        assert_eq!(out.events[1], "season Advent");
        assert_eq!(out.events[2], "month 2024-12");
    }

    #[test]
    fn test_missing_file_aborts_before_output() {
        let generator = Generator::new(config(
            r#"
            [calendar]
            title = "Diocese"
            artefacts = [{ type = "file", path = "/nonexistent/diocese.txt" }]
            "#,
        ));
        let mut out = RecordingOutputter::default();
        let err = generator.run(&mut out).unwrap_err();

        assert!(matches!(err, GenerateError::Artefact(LoadError::FileNotFound(_))));
        assert_eq!(err.exit_code(), 2);
        assert!(out.events.is_empty());
    }
}
