//! Year-bound calendar tree and per-day evaluation

use chrono::NaiveDate;
use ordo_liturgy::{Calendar, CalendarError, DateRange, Day, TemporaleOptions};
use tracing::info;

use crate::definition::CalendarDefinition;
use crate::tree::Tree;

/// Definition tree bound to one liturgical year
#[derive(Debug, Clone)]
pub struct TreeCalendar {
    year: i32,
    calendars: Tree<Calendar>,
}

impl TreeCalendar {
    /// Bind every node's merged sanctorale to `year`
    pub fn bind(
        definitions: &Tree<CalendarDefinition>,
        year: i32,
        options: &TemporaleOptions,
    ) -> Result<Self, CalendarError> {
        let calendars = definitions.try_map(&mut |definition: &CalendarDefinition| {
            Calendar::new(year, definition.sanctorale.clone(), options.clone())
        })?;
        info!(year, calendars = calendars.len(), "calendar tree bound");
        Ok(Self { year, calendars })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn calendars(&self) -> &Tree<Calendar> {
        &self.calendars
    }

    /// Dates of the year, as given by the root calendar
    pub fn date_range(&self) -> DateRange {
        self.calendars.content().date_range()
    }

    /// Day tree for one date
    pub fn day(&self, date: NaiveDate) -> Result<Tree<Day>, CalendarError> {
        self.calendars
            .try_map(&mut |calendar: &Calendar| calendar.day(date))
    }

    /// Day trees for every date of the year, in chronological order
    pub fn days(&self) -> impl Iterator<Item = Result<Tree<Day>, CalendarError>> + '_ {
        self.date_range().map(move |date| self.day(date))
    }
}
