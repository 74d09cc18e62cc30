//! Shared fixtures for integration tests
//!
//! Small sanctorale files with one celebration each, so that reduction
//! results can be asserted exactly:
//! - `parent.txt`: July 16, optional memorial "A"
//! - `child_override.txt`: July 16, proper memorial "B"
//! - `child_other_date.txt`: August 5, proper memorial "C"

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ordo::{ArtefactRef, CalendarSpec, Tree};

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn fixture(name: &str) -> ArtefactRef {
    ArtefactRef::file(fixtures_dir().join(name))
}

pub fn config_path() -> PathBuf {
    fixtures_dir().join("ordo.toml")
}

pub fn node(name: &str, artefacts: &[&str]) -> Tree<CalendarSpec> {
    Tree::new(
        name,
        CalendarSpec {
            artefacts: artefacts.iter().map(|a| fixture(a)).collect(),
        },
    )
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
