//! Report outputters
//!
//! An outputter receives a run's records in chronological order:
//! `prepare`, then per record any `before_season` / `before_month`
//! markers followed by `append`, and finally `finish`.

mod console;
mod json;

use std::io;

use chrono::NaiveDate;
use ordo_liturgy::Season;

pub use console::ConsoleOutputter;
pub use json::{JsonEntry, JsonOutputter, JsonRecord, JsonReport};

use crate::record::Record;

/// Errors raised while rendering or writing a report
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Receives the linearized records of a run
pub trait Outputter {
    fn prepare(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    /// Called before the first record of a season
    fn before_season(&mut self, _season: Season) -> Result<(), OutputError> {
        Ok(())
    }

    /// Called before the first record of a civil month; `date` is that record's date
    fn before_month(&mut self, _date: NaiveDate) -> Result<(), OutputError> {
        Ok(())
    }

    fn append(&mut self, record: &Record) -> Result<(), OutputError>;

    fn finish(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Outputter recording lifecycle calls, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingOutputter {
    pub events: Vec<String>,
}

#[cfg(test)]
impl Outputter for RecordingOutputter {
    fn prepare(&mut self) -> Result<(), OutputError> {
        self.events.push("prepare".to_string());
        Ok(())
    }

    fn before_season(&mut self, season: Season) -> Result<(), OutputError> {
        self.events.push(format!("season {}", season));
        Ok(())
    }

    fn before_month(&mut self, date: NaiveDate) -> Result<(), OutputError> {
        self.events.push(format!("month {}", date.format("%Y-%m")));
        Ok(())
    }

    fn append(&mut self, record: &Record) -> Result<(), OutputError> {
        self.events.push(format!("record {}", record.date));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        self.events.push("finish".to_string());
        Ok(())
    }
}
