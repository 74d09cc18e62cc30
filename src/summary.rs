//! Run summary (run_summary.json)

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use ordo_liturgy::TemporaleOptions;
use serde::{Deserialize, Serialize};

use crate::artefact::ArtefactDigest;
use crate::config::{ConfigSource, OutputFormat};
use crate::definition::CalendarDefinition;
use crate::linearizer::LinearizeStats;
use crate::tree::Tree;

/// Schema version for run_summary.json
pub const RUN_SUMMARY_SCHEMA_VERSION: u32 = 1;

/// Schema identifier for run_summary.json
pub const RUN_SUMMARY_SCHEMA_ID: &str = "ordo/run_summary@1";

/// File name the summary is written to
pub const RUN_SUMMARY_FILE: &str = "run_summary.json";

/// One calendar node as loaded for the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSummary {
    /// The node's own artefacts with SHA-256 of their raw text
    pub artefacts: Vec<ArtefactDigest>,
    /// Dates carrying at least one celebration after merging
    pub sanctorale_dates: usize,
}

impl From<&CalendarDefinition> for CalendarSummary {
    fn from(definition: &CalendarDefinition) -> Self {
        Self {
            artefacts: definition.artefacts.clone(),
            sanctorale_dates: definition.sanctorale.len(),
        }
    }
}

/// Run summary (run_summary.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When the summary was created
    pub created_at: DateTime<Utc>,

    pub title: String,

    /// Liturgical year
    pub year: i32,

    pub format: OutputFormat,

    /// Transfers and extensions applied to every calendar
    pub temporale: TemporaleOptions,

    /// Contributing configuration layers
    pub config_sources: Vec<ConfigSource>,

    /// Calendar hierarchy with loaded artefacts
    pub calendars: Tree<CalendarSummary>,

    /// Dates evaluated
    pub day_count: usize,

    /// Entries reported
    pub entry_count: usize,

    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,

    /// Human-readable summary
    pub human_summary: String,
}

impl RunSummary {
    pub fn new(
        title: String,
        year: i32,
        format: OutputFormat,
        temporale: TemporaleOptions,
        config_sources: Vec<ConfigSource>,
        definitions: &Tree<CalendarDefinition>,
        stats: LinearizeStats,
        duration_ms: u64,
    ) -> Self {
        let calendars = definitions.map(&mut |d: &CalendarDefinition| CalendarSummary::from(d));
        let human_summary = format!(
            "{} {}: {} days, {} entries across {} calendars",
            title,
            year,
            stats.records,
            stats.entries,
            calendars.len()
        );

        Self {
            schema_version: RUN_SUMMARY_SCHEMA_VERSION,
            schema_id: RUN_SUMMARY_SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            title,
            year,
            format,
            temporale,
            config_sources,
            calendars,
            day_count: stats.records,
            entry_count: stats.entries,
            duration_ms,
            human_summary,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write `run_summary.json` into `dir`
    pub fn write_to_dir(&self, dir: &Path) -> io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e)))?;
        fs::create_dir_all(dir)?;
        fs::write(dir.join(RUN_SUMMARY_FILE), json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artefact::ArtefactRef;
    use crate::config::CalendarSpec;
    use crate::definition::build_definition_tree;
    use ordo_liturgy::TransferableFeast;

    fn summary() -> RunSummary {
        let spec = Tree::new(
            "General Roman Calendar",
            CalendarSpec {
                artefacts: vec![ArtefactRef::packaged("universal-en")],
            },
        )
        .with_children(vec![Tree::new("Parish", CalendarSpec::default())]);
        let definitions = build_definition_tree(&spec).unwrap();
        let stats = LinearizeStats {
            records: 364,
            entries: 400,
            seasons: 7,
            months: 12,
        };
        RunSummary::new(
            "Ordo".to_string(),
            2024,
            OutputFormat::Json,
            TemporaleOptions {
                optional_transfer_to_sunday: vec![TransferableFeast::Ascension],
                ..TemporaleOptions::default()
            },
            Vec::new(),
            &definitions,
            stats,
            15,
        )
    }

    #[test]
    fn test_summary_fields() {
        let summary = summary();
        assert_eq!(summary.schema_id, RUN_SUMMARY_SCHEMA_ID);
        assert_eq!(summary.day_count, 364);
        assert_eq!(summary.calendars.len(), 2);
        assert_eq!(summary.calendars.content().artefacts[0].sha256.len(), 64);
        assert!(summary.calendars.children()[0].content().artefacts.is_empty());
        assert!(summary.human_summary.contains("2 calendars"));
    }

    #[test]
    fn test_json_roundtrip() {
        let summary = summary();
        let parsed = RunSummary::from_json(&summary.to_json().unwrap()).unwrap();
        assert_eq!(parsed.calendars, summary.calendars);
        assert_eq!(parsed.format, OutputFormat::Json);
        assert!(parsed.temporale.transfers_optionally(TransferableFeast::Ascension));
    }

    #[test]
    fn test_optional_transfers_reported() {
        let json = summary().to_json().unwrap();
        assert!(json.contains("\"optional_transfer_to_sunday\""));
        assert!(json.contains("\"ascension\""));
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        summary().write_to_dir(dir.path()).unwrap();
        assert!(dir.path().join(RUN_SUMMARY_FILE).exists());
    }
}
