//! Run configuration
//!
//! Configuration is assembled from three layers, later layers winning:
//! 1. Built-in defaults
//! 2. The TOML configuration file (`ordo.toml`)
//! 3. CLI flags
//!
//! The merged document is deserialized once into [`Config`]; artefact
//! references and temporale options are validated at that point and
//! carried as typed values afterwards.

mod calendar;
mod defaults;
mod merge;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use ordo_liturgy::temporale::{first_advent_sunday, MAX_YEAR, MIN_YEAR};
use ordo_liturgy::{Extension, TemporaleOptions, TransferableFeast};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub use calendar::{CalendarSpec, RawArtefact, RawCalendar, ARTEFACT_TYPES};
pub use defaults::BuiltinDefaults;
pub use merge::{deep_merge, merge_layers};

use crate::tree::Tree;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "ordo.toml";

/// Temporale option types accepted in `[[temporale.option]]`
const OPTION_TYPES: &[&str] = &["transfer_to_sunday"];

/// Accepted `apply` values of a temporale option
const APPLY_OPTIONS: &[&str] = &["always", "optional", "never"];

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration file invalid: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("configuration file '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported artefact type '{0}', supported are {}", ARTEFACT_TYPES.join(", "))]
    UnsupportedArtefactType(String),

    #[error("calendar '{calendar}': missing required field '{field}'")]
    MissingField { calendar: String, field: String },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => write!(f, "console"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(Self::Console),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unsupported output format '{}', supported are console, json",
                other
            )),
        }
    }
}

/// Where and how the report is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Output directory; the current directory when unset
    pub dir: Option<PathBuf>,
    /// File name without extension
    pub filename: String,
    pub format: OutputFormat,
}

impl OutputConfig {
    /// Directory output files are written to
    pub fn dir(&self) -> &Path {
        self.dir.as_deref().unwrap_or_else(|| Path::new("."))
    }
}

/// Origin of a configuration layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Cli,
}

/// A contributing configuration layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl ConfigSource {
    fn layer(origin: ConfigOrigin) -> Self {
        Self {
            origin,
            path: None,
            digest: None,
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub year: Option<i32>,
    pub title: Option<String>,
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Convert to a TOML layer; None when no flag was given
    fn to_value(&self) -> Option<toml::Value> {
        let mut root = toml::Table::new();
        let mut output = toml::Table::new();

        if let Some(year) = self.year {
            root.insert("year".into(), i64::from(year).into());
        }
        if let Some(title) = &self.title {
            root.insert("title".into(), title.clone().into());
        }
        if let Some(format) = self.format {
            output.insert("format".into(), format.to_string().into());
        }
        if let Some(dir) = &self.output_dir {
            output.insert("dir".into(), dir.to_string_lossy().into_owned().into());
        }
        if !output.is_empty() {
            root.insert("output".into(), toml::Value::Table(output));
        }

        (!root.is_empty()).then_some(toml::Value::Table(root))
    }
}

/// Fully resolved run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    pub year: i32,
    pub output: OutputConfig,
    pub temporale: TemporaleOptions,
    /// Calendar hierarchy; None when the file declares no `[calendar]`
    pub calendars: Option<Tree<CalendarSpec>>,
    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    title: String,
    year: Option<i32>,
    output: RawOutput,
    #[serde(default)]
    temporale: RawTemporale,
    calendar: Option<RawCalendar>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOutput {
    dir: Option<PathBuf>,
    filename: String,
    format: OutputFormat,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTemporale {
    #[serde(default)]
    extensions: Vec<String>,
    #[serde(default, rename = "option")]
    options: Vec<RawTemporaleOption>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTemporaleOption {
    #[serde(rename = "type")]
    kind: String,
    feast: String,
    apply: String,
}

impl RawTemporale {
    fn into_options(self) -> Result<TemporaleOptions, ConfigError> {
        let mut options = TemporaleOptions::default();

        for option in self.options {
            if !OPTION_TYPES.contains(&option.kind.as_str()) {
                return Err(invalid(
                    "temporale.option.type",
                    format!(
                        "unsupported temporale option '{}', supported are {}",
                        option.kind,
                        OPTION_TYPES.join(", ")
                    ),
                ));
            }

            let feast: TransferableFeast = option
                .feast
                .parse()
                .map_err(|reason| invalid("temporale.option.feast", reason))?;

            match option.apply.as_str() {
                "always" => {
                    if !options.transfers(feast) {
                        options.transfer_to_sunday.push(feast);
                    }
                }
                "optional" => {
                    if !options.transfers_optionally(feast) {
                        options.optional_transfer_to_sunday.push(feast);
                    }
                }
                "never" => {}
                other => {
                    return Err(invalid(
                        "temporale.option.apply",
                        format!("'{}', supported are {}", other, APPLY_OPTIONS.join(", ")),
                    ))
                }
            }
        }

        for name in self.extensions {
            let extension: Extension = name
                .parse()
                .map_err(|reason| invalid("temporale.extensions", reason))?;
            if !options.has_extension(extension) {
                options.extensions.push(extension);
            }
        }

        Ok(options)
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

impl Config {
    /// Load configuration from a file without CLI overrides
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load(path, &ConfigOverrides::default())
    }

    /// Load configuration from a file, layering CLI overrides on top
    pub fn load(path: &Path, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        let digest = hex::encode(Sha256::digest(&bytes));
        let contents = String::from_utf8(bytes)
            .map_err(|e| invalid("(file)", format!("invalid UTF-8: {}", e)))?;

        let source = ConfigSource {
            origin: ConfigOrigin::File,
            path: Some(path.to_string_lossy().to_string()),
            digest: Some(digest),
        };
        Self::build(&contents, path.parent(), source, overrides)
    }

    /// Parse configuration text; relative file artefacts stay relative
    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        Self::build(
            contents,
            None,
            ConfigSource::layer(ConfigOrigin::File),
            &ConfigOverrides::default(),
        )
    }

    fn build(
        contents: &str,
        base_dir: Option<&Path>,
        file_source: ConfigSource,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let file_value = toml::Value::Table(toml::from_str::<toml::Table>(contents)?);

        let mut layers = vec![BuiltinDefaults::default().to_value(), file_value];
        let mut sources = vec![ConfigSource::layer(ConfigOrigin::Builtin), file_source];
        if let Some(cli) = overrides.to_value() {
            layers.push(cli);
            sources.push(ConfigSource::layer(ConfigOrigin::Cli));
        }

        let raw: RawConfig = merge_layers(layers).try_into()?;
        let config = Self {
            title: raw.title,
            year: raw
                .year
                .unwrap_or_else(|| upcoming_year(Local::now().date_naive())),
            output: OutputConfig {
                dir: raw.output.dir,
                filename: raw.output.filename,
                format: raw.output.format,
            },
            temporale: raw.temporale.into_options()?,
            calendars: raw.calendar.map(|c| c.into_tree(base_dir)).transpose()?,
            sources,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(invalid(
                "year",
                format!("{} is outside {}..={}", self.year, MIN_YEAR, MAX_YEAR),
            ));
        }
        if self.output.filename.trim().is_empty() {
            return Err(invalid("output.filename", "must not be empty"));
        }
        Ok(())
    }
}

/// Liturgical year whose first Sunday of Advent is still ahead of `today`
pub fn upcoming_year(today: NaiveDate) -> i32 {
    match first_advent_sunday(today.year()) {
        Some(advent) if today < advent => today.year(),
        _ => today.year() + 1,
    }
}
