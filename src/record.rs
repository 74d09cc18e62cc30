//! Output records
//!
//! A [`Record`] holds everything reported for one date: one [`Entry`] per
//! locality whose observance differs from the others.

use chrono::{Datelike, NaiveDate};
use ordo_liturgy::{Celebration, Day, Season};
use serde::Serialize;

/// Reported entries of one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub date: NaiveDate,
    pub season: Season,
    pub entries: Vec<Entry>,
}

impl Record {
    /// Civil (year, month) of the record
    pub fn month(&self) -> (i32, u32) {
        (self.date.year(), self.date.month())
    }
}

/// One locality's observance of a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Position within the date, 0 for the first entry
    pub order: usize,
    /// Name of the calendar node the entry comes from
    pub title: String,
    pub day: Day,
}

impl Entry {
    /// Subsequent entries of a date omit the date heading
    pub fn nth_entry(&self) -> bool {
        self.order > 0
    }

    pub fn heading(&self) -> String {
        format!("{}:", self.title)
    }

    pub fn celebrations(&self) -> &[Celebration] {
        &self.day.celebrations
    }

    /// This evening's vespers belong to the following day
    pub fn vespers_from_following(&self) -> bool {
        self.day.vespers.is_some()
    }

    pub fn vespers_from_following_sunday(&self) -> bool {
        self.day.vespers.as_ref().is_some_and(|c| c.rank.is_sunday())
    }

    pub fn vespers_from_following_feast(&self) -> bool {
        self.day.vespers.as_ref().is_some_and(|c| c.rank.is_feast())
    }

    /// Compline after first vespers of a solemnity or feast needs a note;
    /// after Sunday first vespers it is the usual Saturday compline.
    pub fn compline_worth_mentioning(&self) -> bool {
        self.vespers_from_following() && !self.vespers_from_following_sunday()
    }

    pub fn vespers_note(&self) -> Option<&'static str> {
        if !self.vespers_from_following() {
            None
        } else if self.vespers_from_following_sunday() {
            Some("Vespers from the following Sunday")
        } else if self.vespers_from_following_feast() {
            Some("Vespers from the following feast")
        } else {
            Some("Vespers from the following solemnity")
        }
    }

    pub fn compline_note(&self) -> Option<&'static str> {
        self.compline_worth_mentioning()
            .then_some("Compline after first Vespers of Sunday")
    }
}
