//! Ordo - hierarchical liturgical calendar resolution
//!
//! Resolves a hierarchy of nested calendars (nation, province, diocese)
//! into one chronological list of records for a liturgical year and
//! renders it through an outputter.

pub mod artefact;
pub mod config;
pub mod definition;
pub mod generator;
pub mod linearizer;
pub mod output;
pub mod record;
pub mod reducer;
pub mod summary;
pub mod tree;
pub mod tree_calendar;

pub use artefact::{ArtefactDigest, ArtefactRef, ArtefactResolver};
pub use config::{CalendarSpec, Config, ConfigError, ConfigOverrides, OutputFormat};
pub use definition::{CalendarDefinition, DefinitionBuilder};
pub use generator::{GenerateError, Generator};
pub use linearizer::{LinearizeError, LinearizeStats, Linearizer};
pub use output::{ConsoleOutputter, JsonOutputter, OutputError, Outputter};
pub use record::{Entry, Record};
pub use reducer::{ReduceError, TreeReducer};
pub use summary::RunSummary;
pub use tree::Tree;
pub use tree_calendar::TreeCalendar;
