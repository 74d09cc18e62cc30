//! JSON report (`<dir>/<filename>.json`)

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ordo_liturgy::{Celebration, Season};
use serde::{Deserialize, Serialize};

use super::{OutputError, Outputter};
use crate::record::{Entry, Record};

/// Serialized report document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub title: String,
    pub year: i32,
    pub records: Vec<JsonRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRecord {
    pub date: NaiveDate,
    pub season: Season,
    pub season_week: u32,
    pub entries: Vec<JsonEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEntry {
    pub order: usize,
    pub title: String,
    pub celebrations: Vec<Celebration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vespers: Option<Celebration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vespers_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compline_note: Option<String>,
}

impl From<&Entry> for JsonEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            order: entry.order,
            title: entry.title.clone(),
            celebrations: entry.day.celebrations.clone(),
            vespers: entry.day.vespers.clone(),
            vespers_note: entry.vespers_note().map(str::to_string),
            compline_note: entry.compline_note().map(str::to_string),
        }
    }
}

impl From<&Record> for JsonRecord {
    fn from(record: &Record) -> Self {
        Self {
            date: record.date,
            season: record.season,
            season_week: record
                .entries
                .first()
                .map(|e| e.day.season_week)
                .unwrap_or_default(),
            entries: record.entries.iter().map(JsonEntry::from).collect(),
        }
    }
}

/// Collects records and writes them as one JSON document on finish
pub struct JsonOutputter {
    path: PathBuf,
    report: JsonReport,
}

impl JsonOutputter {
    pub fn new(dir: &Path, filename: &str, title: impl Into<String>, year: i32) -> Self {
        Self {
            path: dir.join(format!("{}.json", filename)),
            report: JsonReport {
                title: title.into(),
                year,
                records: Vec::new(),
            },
        }
    }

    /// File the report is written to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Outputter for JsonOutputter {
    fn prepare(&mut self) -> Result<(), OutputError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    fn append(&mut self, record: &Record) -> Result<(), OutputError> {
        self.report.records.push(JsonRecord::from(record));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        let json = serde_json::to_string_pretty(&self.report)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
