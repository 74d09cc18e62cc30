//! Full runs driven by a configuration file

mod fixtures;

use std::fs;

use chrono::{Datelike, NaiveDate};
use fixtures::{config_path, date};
use ordo::output::JsonReport;
use ordo::summary::{RUN_SUMMARY_FILE, RUN_SUMMARY_SCHEMA_ID};
use ordo::{
    Config, ConfigError, ConfigOverrides, GenerateError, Generator, OutputError, OutputFormat,
    Outputter, Record, RunSummary,
};
use ordo_liturgy::Season;
use tempfile::TempDir;

/// Keeps the sequence of lifecycle calls
#[derive(Default)]
struct Trace {
    events: Vec<Event>,
}

#[derive(Debug, PartialEq)]
enum Event {
    Prepare,
    Season(Season),
    Month(NaiveDate),
    Record(NaiveDate, Season, usize),
    Finish,
}

impl Outputter for Trace {
    fn prepare(&mut self) -> Result<(), OutputError> {
        self.events.push(Event::Prepare);
        Ok(())
    }

    fn before_season(&mut self, season: Season) -> Result<(), OutputError> {
        self.events.push(Event::Season(season));
        Ok(())
    }

    fn before_month(&mut self, date: NaiveDate) -> Result<(), OutputError> {
        self.events.push(Event::Month(date));
        Ok(())
    }

    fn append(&mut self, record: &Record) -> Result<(), OutputError> {
        self.events
            .push(Event::Record(record.date, record.season, record.entries.len()));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        self.events.push(Event::Finish);
        Ok(())
    }
}

fn fixture_config() -> Config {
    Config::from_file(&config_path()).unwrap()
}

#[test]
fn test_fixture_config_resolves_relative_paths() {
    let config = fixture_config();
    let calendars = config.calendars.as_ref().unwrap();
    assert_eq!(calendars.len(), 3);

    let generator = Generator::new(config);
    let definitions = generator.definitions().unwrap();
    assert_eq!(definitions.content().artefacts.len(), 1);
    assert_eq!(definitions.content().sanctorale.len(), 1);
}

#[test]
fn test_chronological_order_and_markers() {
    let generator = Generator::new(fixture_config());
    let mut trace = Trace::default();
    let summary = generator.run(&mut trace).unwrap();

    assert_eq!(trace.events.first(), Some(&Event::Prepare));
    assert_eq!(trace.events.last(), Some(&Event::Finish));

    let mut previous: Option<(NaiveDate, Season)> = None;
    let mut pending_season = None;
    let mut pending_month = None;
    let mut months = 0;

    for event in &trace.events {
        match *event {
            Event::Season(season) => {
                assert!(pending_season.is_none(), "two season markers in a row");
                pending_season = Some(season);
            }
            Event::Month(d) => {
                assert!(pending_month.is_none(), "two month markers in a row");
                pending_month = Some(d);
                months += 1;
            }
            Event::Record(d, season, entries) => {
                assert!(entries > 0, "{} has no entries", d);

                let season_changed = previous.map_or(true, |(_, s)| s != season);
                assert_eq!(pending_season.take(), season_changed.then_some(season), "{}", d);

                let month_changed = previous.map_or(true, |(p, _)| p.month() != d.month());
                assert_eq!(pending_month.take(), month_changed.then_some(d), "{}", d);

                if let Some((p, _)) = previous {
                    assert!(d > p, "{} after {}", d, p);
                }
                previous = Some((d, season));
            }
            Event::Prepare | Event::Finish => {}
        }
    }

    // December 2024 through November 2025
    assert_eq!(months, 12);
    assert_eq!(summary.day_count, 364);
    assert_eq!(previous.map(|(d, _)| d), Some(date(2025, 11, 29)));
}

#[test]
fn test_generate_json_report() {
    let out = TempDir::new().unwrap();
    let overrides = ConfigOverrides {
        output_dir: Some(out.path().to_path_buf()),
        ..Default::default()
    };
    let config = Config::load(&config_path(), &overrides).unwrap();
    assert_eq!(config.output.format, OutputFormat::Json);

    let summary = Generator::new(config).generate().unwrap();

    let report: JsonReport =
        serde_json::from_str(&fs::read_to_string(out.path().join("test_ordo.json")).unwrap())
            .unwrap();
    assert_eq!(report.title, "Test Ordo");
    assert_eq!(report.records.len(), 364);

    let july_16 = report
        .records
        .iter()
        .find(|r| r.date == date(2025, 7, 16))
        .unwrap();
    let localities: Vec<_> = july_16.entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(localities, ["Province", "Other Province"]);
    assert_eq!(july_16.entries[0].celebrations[0].title, "B");

    let written: RunSummary = RunSummary::from_json(
        &fs::read_to_string(out.path().join(RUN_SUMMARY_FILE)).unwrap(),
    )
    .unwrap();
    assert_eq!(written.schema_id, RUN_SUMMARY_SCHEMA_ID);
    assert_eq!(written.entry_count, summary.entry_count);
    assert_eq!(written.calendars.len(), 3);
    assert_eq!(written.config_sources.len(), 3);
}

#[test]
fn test_missing_artefact_file_exit_code() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ordo.toml");
    fs::write(
        &path,
        r#"
        year = 2024
        [calendar]
        title = "Diocese"
        artefacts = [{ type = "file", path = "missing.txt" }]
        "#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    let err = Generator::new(config).run(&mut Trace::default()).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("doesn't exist"));
}

#[test]
fn test_unknown_packaged_reference() {
    let config = Config::from_str(
        r#"
        year = 2024
        [calendar]
        title = "Nowhere"
        artefacts = [{ type = "packaged", ref = "atlantis-la" }]
        "#,
    )
    .unwrap();
    let err = Generator::new(config).definitions().unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Artefact(ordo_liturgy::LoadError::UnknownPackagedReference(_))
    ));
}

#[test]
fn test_unsupported_artefact_type_is_config_error() {
    let err = Config::from_str(
        r#"
        [calendar]
        title = "Nation"
        artefacts = [{ type = "url", ref = "x" }]
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedArtefactType(_)));
    assert_eq!(GenerateError::from(err).exit_code(), 1);
}

#[test]
fn test_packaged_national_hierarchy() {
    let config = Config::from_str(
        r#"
        year = 2024
        [calendar]
        title = "Czech Republic"
        artefacts = [
            { type = "packaged", ref = "universal-en" },
            { type = "packaged", ref = "czech-cs" },
        ]
        [[calendar.calendar]]
        title = "province of Bohemia"
        artefacts = [{ type = "packaged", ref = "czech-cechy-cs" }]
        [[calendar.calendar]]
        title = "province of Moravia"
        artefacts = [{ type = "packaged", ref = "czech-morava-cs" }]
        "#,
    )
    .unwrap();

    let mut trace = Trace::default();
    let summary = Generator::new(config).run(&mut trace).unwrap();
    assert_eq!(summary.day_count, 364);
    assert!(summary.entry_count >= 2 * 364);
}
