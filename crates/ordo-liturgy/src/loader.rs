//! Sanctorale text format
//!
//! One celebration per line:
//!
//! ```text
//! = 1                                   # month heading
//! 17 m : Saint Anthony, abbot           # day within the current month
//! 7/16 : Our Lady of Mount Carmel       # explicit month, optional memorial
//! 7/4 m3.11 : Saint Procopius, abbot    # rank with explicit priority
//! 12/26 f R : Saint Stephen, the first martyr
//! ```
//!
//! Rank codes: `s` solemnity, `f` feast, `m` memorial, none for an
//! optional memorial. Colour codes: `W` white (default), `R` red,
//! `G` green, `V` violet. A leading `---` block (front matter) is skipped.

use std::path::Path;

use regex_lite::Regex;
use tracing::debug;

use crate::celebration::{Celebration, Colour, Rank};
use crate::error::LoadError;
use crate::sanctorale::Sanctorale;

const LINE_PATTERN: &str =
    r"^(?:(\d+)/)?(\d+)(?:\s+([smf])(\d\.\d{1,2})?)?(?:\s+([RWGV]))?(?:\s+([a-z][a-z0-9_]*))?\s*:\s*(\S.*)$";

const MONTH_PATTERN: &str = r"^=\s*(\d+)";

/// Parser for the sanctorale text format
pub struct SanctoraleLoader {
    line: Regex,
    month: Regex,
}

impl Default for SanctoraleLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SanctoraleLoader {
    pub fn new() -> Self {
        Self {
            line: Regex::new(LINE_PATTERN).expect("sanctorale line pattern is valid"),
            month: Regex::new(MONTH_PATTERN).expect("month heading pattern is valid"),
        }
    }

    /// Read the raw text of a dataset file
    pub fn read_file(path: &Path) -> Result<String, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.to_path_buf()));
        }
        Ok(std::fs::read_to_string(path)?)
    }

    /// Load a sanctorale from a file
    pub fn load_from_file(&self, path: &Path) -> Result<Sanctorale, LoadError> {
        let source = Self::read_file(path)?;
        debug!(path = %path.display(), "parsing sanctorale file");
        self.load_from_str(&source)
    }

    /// Parse a sanctorale from its textual representation
    pub fn load_from_str(&self, source: &str) -> Result<Sanctorale, LoadError> {
        let mut sanctorale = Sanctorale::new();
        let mut month: Option<u32> = None;
        let mut in_front_matter = false;
        let mut seen_content = false;

        for (index, raw) in source.lines().enumerate() {
            let line_no = index + 1;
            let line = strip_comment(raw).trim();

            if line == "---" {
                if !seen_content || in_front_matter {
                    in_front_matter = !in_front_matter;
                    seen_content = true;
                    continue;
                }
                return Err(parse_error(line_no, "unexpected front matter delimiter"));
            }
            if in_front_matter || line.is_empty() {
                continue;
            }
            seen_content = true;

            if let Some(caps) = self.month.captures(line) {
                let m = parse_number(&caps[1], line_no)?;
                if !(1..=12).contains(&m) {
                    return Err(parse_error(line_no, format!("invalid month {}", m)));
                }
                month = Some(m);
                continue;
            }

            let caps = self
                .line
                .captures(line)
                .ok_or_else(|| parse_error(line_no, format!("syntax error in '{}'", line)))?;

            let m = match caps.get(1) {
                Some(m) => parse_number(m.as_str(), line_no)?,
                None => month.ok_or_else(|| parse_error(line_no, "month not specified"))?,
            };
            let day = parse_number(&caps[2], line_no)?;
            let rank = parse_rank(
                caps.get(3).map(|m| m.as_str()),
                caps.get(4).map(|m| m.as_str()),
                line_no,
            )?;
            let colour = parse_colour(caps.get(5).map(|m| m.as_str()));
            let title = caps[7].trim().to_string();

            sanctorale
                .add(m, day, Celebration::new(title, rank, colour))
                .map_err(|e| parse_error(line_no, e.to_string()))?;
        }

        if in_front_matter {
            return Err(parse_error(source.lines().count(), "unterminated front matter"));
        }

        Ok(sanctorale)
    }
}

/// `#` opens a comment at the start of a line or after whitespace
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let start = (0..bytes.len())
        .find(|&i| bytes[i] == b'#' && (i == 0 || bytes[i - 1].is_ascii_whitespace()));
    match start {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_number(s: &str, line: usize) -> Result<u32, LoadError> {
    s.parse()
        .map_err(|_| parse_error(line, format!("invalid number '{}'", s)))
}

fn parse_rank(code: Option<&str>, priority: Option<&str>, line: usize) -> Result<Rank, LoadError> {
    let rank = match (code, priority) {
        (None, _) => Rank::MemorialOptional,
        (Some("s"), None | Some("1.3")) => Rank::SolemnityGeneral,
        (Some("s"), Some("1.4")) => Rank::SolemnityProper,
        (Some("f"), Some("2.5")) => Rank::FeastLord,
        (Some("f"), None | Some("2.7")) => Rank::FeastGeneral,
        (Some("f"), Some("2.8")) => Rank::FeastProper,
        (Some("m"), None | Some("3.10")) => Rank::MemorialGeneral,
        (Some("m"), Some("3.11")) => Rank::MemorialProper,
        (Some("m"), Some("3.12")) => Rank::MemorialOptional,
        (Some(c), Some(p)) => {
            return Err(parse_error(line, format!("priority {} invalid for rank '{}'", p, c)))
        }
        (Some(c), None) => return Err(parse_error(line, format!("unknown rank '{}'", c))),
    };
    Ok(rank)
}

fn parse_colour(code: Option<&str>) -> Colour {
    match code {
        Some("R") => Colour::Red,
        Some("G") => Colour::Green,
        Some("V") => Colour::Violet,
        _ => Colour::White,
    }
}
