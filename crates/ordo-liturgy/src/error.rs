//! Error types for dataset loading and calendar computation.

use std::path::PathBuf;

use chrono::NaiveDate;

/// Errors raised while resolving or parsing a sanctorale dataset
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unsupported packaged calendar reference '{0}'")]
    UnknownPackagedReference(String),

    #[error("file '{}' doesn't exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read sanctorale file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Errors raised by year-bound calendars
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("date {date} is outside of liturgical year {year}")]
    DateOutOfRange { date: NaiveDate, year: i32 },

    #[error("unsupported liturgical year {0}")]
    InvalidYear(i32),
}
