//! Sanctorale: celebrations bound to fixed dates
//!
//! A sanctorale maps a (month, day) pair to the ordered list of
//! celebrations assigned to it. Several sanctoralia are combined by
//! layering: a later layer replaces the whole celebration list of every
//! date it defines, dates it leaves alone are inherited.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::celebration::{Celebration, Rank};

/// A (month, day) pair not bound to any year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    /// Create a month-day pair, rejecting dates that exist in no year
    pub fn new(month: u32, day: u32) -> Result<Self, SanctoraleError> {
        let max = match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => 29,
            _ => return Err(SanctoraleError::InvalidDate { month, day }),
        };
        if day == 0 || day > max {
            return Err(SanctoraleError::InvalidDate { month, day });
        }
        Ok(Self { month, day })
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.day)
    }
}

/// Errors raised when populating a sanctorale
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanctoraleError {
    #[error("invalid date {month}/{day}")]
    InvalidDate { month: u32, day: u32 },

    #[error("{date}: only optional memorials may share a date, cannot add '{title}'")]
    Conflict { date: MonthDay, title: String },
}

/// Fixed-date celebrations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sanctorale {
    days: BTreeMap<MonthDay, Vec<Celebration>>,
}

impl Sanctorale {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a celebration to a date.
    ///
    /// A date holds either one celebration of any rank or any number of
    /// optional memorials.
    pub fn add(&mut self, month: u32, day: u32, celebration: Celebration) -> Result<(), SanctoraleError> {
        let date = MonthDay::new(month, day)?;
        let existing = self.days.entry(date).or_default();

        let all_optional = existing
            .iter()
            .chain(std::iter::once(&celebration))
            .all(|c| c.rank == Rank::MemorialOptional);
        if !existing.is_empty() && !all_optional {
            return Err(SanctoraleError::Conflict {
                date,
                title: celebration.title,
            });
        }

        existing.push(celebration);
        Ok(())
    }

    /// Replace the whole celebration list of a date
    pub fn replace(&mut self, month: u32, day: u32, celebrations: Vec<Celebration>) -> Result<(), SanctoraleError> {
        let date = MonthDay::new(month, day)?;
        if celebrations.is_empty() {
            self.days.remove(&date);
        } else {
            self.days.insert(date, celebrations);
        }
        Ok(())
    }

    /// Celebrations of a date (empty if none)
    pub fn get(&self, month: u32, day: u32) -> &[Celebration] {
        self.days
            .get(&MonthDay { month, day })
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Overlay `other` on top of this sanctorale: every date `other` defines
    /// replaces the date here.
    pub fn update(&mut self, other: &Sanctorale) {
        for (date, celebrations) in &other.days {
            self.days.insert(*date, celebrations.clone());
        }
    }

    /// Merge layers left to right, later layers taking precedence
    pub fn merge_layered(layers: &[&Sanctorale]) -> Sanctorale {
        layers.iter().fold(Sanctorale::new(), |mut merged, layer| {
            merged.update(layer);
            merged
        })
    }

    /// Iterate dates in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (MonthDay, &[Celebration])> {
        self.days.iter().map(|(date, c)| (*date, c.as_slice()))
    }

    /// Dates carrying a solemnity
    pub fn solemnities(&self) -> impl Iterator<Item = (MonthDay, &Celebration)> {
        self.days.iter().filter_map(|(date, c)| {
            c.iter()
                .find(|c| c.rank.is_solemnity())
                .map(|c| (*date, c))
        })
    }

    /// Number of dates with at least one celebration
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
