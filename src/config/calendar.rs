//! Calendar hierarchy section of the configuration
//!
//! ```toml
//! [calendar]
//! title = "Czech Republic"
//! artefacts = [{ type = "packaged", ref = "universal-en" }, { type = "packaged", ref = "czech-cs" }]
//!
//! [[calendar.calendar]]
//! title = "province of Bohemia"
//! artefacts = [{ type = "packaged", ref = "czech-cechy-cs" }]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;
use crate::artefact::{resolve_relative, ArtefactRef};
use crate::tree::Tree;

/// Artefact types accepted in `type = "..."`
pub const ARTEFACT_TYPES: &[&str] = &["packaged", "file"];

/// Configured content of one calendar node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarSpec {
    /// Artefacts in document order, lowest priority first
    pub artefacts: Vec<ArtefactRef>,
}

/// Calendar node as written in the configuration file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCalendar {
    pub title: String,

    #[serde(default)]
    pub artefacts: Vec<RawArtefact>,

    /// Nested calendars
    #[serde(default, rename = "calendar")]
    pub children: Vec<RawCalendar>,
}

/// Artefact entry as written in the configuration file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawArtefact {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(rename = "ref")]
    pub reference: Option<String>,

    pub path: Option<PathBuf>,
}

impl RawArtefact {
    /// Convert to a typed reference, resolving relative paths against `base_dir`
    pub fn into_ref(self, calendar: &str, base_dir: Option<&Path>) -> Result<ArtefactRef, ConfigError> {
        let missing = |field: &str| ConfigError::MissingField {
            calendar: calendar.to_string(),
            field: field.to_string(),
        };

        match self.kind.as_str() {
            "packaged" => {
                let key = self.reference.ok_or_else(|| missing("ref"))?;
                Ok(ArtefactRef::Packaged { key })
            }
            "file" => {
                let path = self.path.ok_or_else(|| missing("path"))?;
                Ok(ArtefactRef::File {
                    path: resolve_relative(&path, base_dir),
                })
            }
            other => Err(ConfigError::UnsupportedArtefactType(other.to_string())),
        }
    }
}

impl RawCalendar {
    /// Convert the nested configuration into a calendar tree
    pub fn into_tree(self, base_dir: Option<&Path>) -> Result<Tree<CalendarSpec>, ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::MissingField {
                calendar: "(untitled)".to_string(),
                field: "title".to_string(),
            });
        }

        let artefacts = self
            .artefacts
            .into_iter()
            .map(|a| a.into_ref(&self.title, base_dir))
            .collect::<Result<Vec<_>, _>>()?;

        let children = self
            .children
            .into_iter()
            .map(|c| c.into_tree(base_dir))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Tree::new(self.title, CalendarSpec { artefacts }).with_children(children))
    }
}
