//! Linearizer
//!
//! Feeds records to an outputter in chronological order, inserting a
//! season marker whenever the season differs from the previous record's
//! and a month marker whenever the civil month does.

use chrono::NaiveDate;
use ordo_liturgy::Season;
use tracing::debug;

use crate::output::{OutputError, Outputter};
use crate::record::Record;

#[derive(Debug, thiserror::Error)]
pub enum LinearizeError {
    #[error("record for {date} received after record for {previous}")]
    OutOfOrder { date: NaiveDate, previous: NaiveDate },

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Counts of what was handed to the outputter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearizeStats {
    pub records: usize,
    pub entries: usize,
    pub seasons: usize,
    pub months: usize,
}

#[derive(Debug, Clone, Copy)]
struct Position {
    date: NaiveDate,
    season: Season,
    month: (i32, u32),
}

/// Drives an outputter through one run
pub struct Linearizer<'a, O: Outputter + ?Sized> {
    outputter: &'a mut O,
    previous: Option<Position>,
    stats: LinearizeStats,
}

impl<'a, O: Outputter + ?Sized> Linearizer<'a, O> {
    /// Start a run; calls `prepare` on the outputter
    pub fn start(outputter: &'a mut O) -> Result<Self, LinearizeError> {
        outputter.prepare()?;
        Ok(Self {
            outputter,
            previous: None,
            stats: LinearizeStats::default(),
        })
    }

    pub fn push(&mut self, record: &Record) -> Result<(), LinearizeError> {
        let current = Position {
            date: record.date,
            season: record.season,
            month: record.month(),
        };

        if let Some(previous) = self.previous {
            if current.date <= previous.date {
                return Err(LinearizeError::OutOfOrder {
                    date: current.date,
                    previous: previous.date,
                });
            }
        }

        if self.previous.map_or(true, |p| p.season != current.season) {
            debug!(season = %current.season, date = %current.date, "season begins");
            self.outputter.before_season(current.season)?;
            self.stats.seasons += 1;
        }
        if self.previous.map_or(true, |p| p.month != current.month) {
            self.outputter.before_month(current.date)?;
            self.stats.months += 1;
        }

        self.outputter.append(record)?;
        self.stats.records += 1;
        self.stats.entries += record.entries.len();
        self.previous = Some(current);
        Ok(())
    }

    /// End the run; calls `finish` on the outputter
    pub fn finish(self) -> Result<LinearizeStats, LinearizeError> {
        self.outputter.finish()?;
        Ok(self.stats)
    }
}
