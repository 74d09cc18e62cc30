//! Year-bound calendar
//!
//! Combines the temporale of a liturgical year with a sanctorale and
//! resolves precedence between them, answering "what is celebrated on
//! date D" for every date of the year.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::celebration::{Celebration, Rank, Season};
use crate::error::CalendarError;
use crate::sanctorale::Sanctorale;
use crate::temporale::{Temporale, TemporaleOptions, MAX_YEAR};

/// Computed liturgical state of one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    pub season: Season,
    pub season_week: u32,
    /// Celebrations in order of precedence, never empty
    pub celebrations: Vec<Celebration>,
    /// Celebration of the following day whose first vespers are said this evening
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vespers: Option<Celebration>,
}

impl Day {
    /// Principal celebration of the day
    pub fn primary(&self) -> &Celebration {
        &self.celebrations[0]
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn is_sunday(&self) -> bool {
        self.weekday() == Weekday::Sun
    }
}

/// Inclusive range of dates, iterated in chronological order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    next: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            next: (start <= end).then_some(start),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map(|n| (self.end - n).num_days() as usize + 1)
            .unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DateRange {}

/// Calendar of one liturgical year over a fixed sanctorale
#[derive(Debug, Clone)]
pub struct Calendar {
    temporale: Temporale,
    sanctorale: Arc<Sanctorale>,
    /// Impeded solemnities, keyed by the date they were moved to
    transferred: BTreeMap<NaiveDate, Celebration>,
    /// Dates whose solemnity was moved away
    impeded: BTreeSet<NaiveDate>,
}

impl Calendar {
    pub fn new(year: i32, sanctorale: Arc<Sanctorale>, options: TemporaleOptions) -> Result<Self, CalendarError> {
        let temporale = Temporale::new(year, options)?;
        let mut calendar = Self {
            temporale,
            sanctorale,
            transferred: BTreeMap::new(),
            impeded: BTreeSet::new(),
        };
        calendar.transfer_impeded_solemnities();
        Ok(calendar)
    }

    pub fn year(&self) -> i32 {
        self.temporale.year()
    }

    pub fn sanctorale(&self) -> &Arc<Sanctorale> {
        &self.sanctorale
    }

    pub fn temporale(&self) -> &Temporale {
        &self.temporale
    }

    /// All dates of the liturgical year
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.temporale.start_date(), self.temporale.end_date())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.temporale.contains(date)
    }

    /// Liturgical day for a date of this year
    pub fn day(&self, date: NaiveDate) -> Result<Day, CalendarError> {
        if !self.contains(date) {
            return Err(CalendarError::DateOutOfRange {
                date,
                year: self.year(),
            });
        }

        let celebrations = self.celebrations(date);
        let vespers = self.first_vespers(date, &celebrations[0])?;

        Ok(Day {
            date,
            season: self.temporale.season(date),
            season_week: self.temporale.season_week(date),
            celebrations,
            vespers,
        })
    }

    /// Map a sanctorale date into this liturgical year
    fn date_in_year(&self, month: u32, day: u32) -> Option<NaiveDate> {
        let start = self.temporale.start_date();
        [start.year(), start.year() + 1]
            .into_iter()
            .filter_map(|y| NaiveDate::from_ymd_opt(y, month, day))
            .find(|d| self.contains(*d))
    }

    fn transfer_impeded_solemnities(&mut self) {
        let solemnities: Vec<(NaiveDate, Celebration)> = self
            .sanctorale
            .solemnities()
            .filter_map(|(md, c)| self.date_in_year(md.month, md.day).map(|d| (d, c.clone())))
            .collect();

        let occupied: BTreeSet<NaiveDate> = solemnities.iter().map(|(d, _)| *d).collect();

        for (date, solemnity) in solemnities {
            if !self.temporale.get(date).rank.outranks(&solemnity.rank) {
                continue;
            }

            let mut target = date + Duration::days(1);
            while self.contains(target) {
                let free = !self.temporale.get(target).rank.outranks(&solemnity.rank)
                    && !occupied.contains(&target)
                    && !self.transferred.contains_key(&target);
                if free {
                    break;
                }
                target += Duration::days(1);
            }

            self.impeded.insert(date);
            if self.contains(target) {
                debug!(title = %solemnity.title, from = %date, to = %target, "transferring impeded solemnity");
                self.transferred.insert(target, solemnity);
            } else {
                warn!(
                    title = %solemnity.title,
                    from = %date,
                    year = self.year(),
                    "impeded solemnity has no free date left in the year, dropped"
                );
            }
        }
    }

    fn sanctorale_for(&self, date: NaiveDate) -> Vec<Celebration> {
        if let Some(c) = self.transferred.get(&date) {
            return vec![c.clone()];
        }
        if self.impeded.contains(&date) {
            return Vec::new();
        }
        self.sanctorale.get(date.month(), date.day()).to_vec()
    }

    /// Celebrations of a date in order of precedence
    fn celebrations(&self, date: NaiveDate) -> Vec<Celebration> {
        let temporale = self.temporale.get(date);
        let sanctorale = self.sanctorale_for(date);

        if sanctorale.is_empty() {
            return vec![temporale];
        }

        if sanctorale.iter().all(|c| c.rank == Rank::MemorialOptional) {
            return match temporale.rank {
                Rank::Ferial => std::iter::once(temporale).chain(sanctorale).collect(),
                Rank::FerialPrivileged => std::iter::once(temporale)
                    .chain(sanctorale.iter().map(Celebration::as_commemoration))
                    .collect(),
                _ => vec![temporale],
            };
        }

        let proper = &sanctorale[0];
        if proper.rank.outranks(&temporale.rank) {
            vec![proper.clone()]
        } else if proper.rank.is_memorial() && temporale.rank == Rank::FerialPrivileged {
            vec![temporale, proper.as_commemoration()]
        } else {
            vec![temporale]
        }
    }

    /// First vespers of the following day, if they replace this evening's vespers
    fn first_vespers(&self, date: NaiveDate, today: &Celebration) -> Result<Option<Celebration>, CalendarError> {
        if today.rank == Rank::Triduum {
            return Ok(None);
        }

        let tomorrow = date
            .succ_opt()
            .ok_or(CalendarError::InvalidYear(self.year()))?;
        let following = if self.contains(tomorrow) {
            self.celebrations(tomorrow)
        } else if self.year() >= MAX_YEAR {
            debug!(year = self.year(), %tomorrow, "no following liturgical year, first vespers omitted");
            return Ok(None);
        } else {
            Calendar::new(self.year() + 1, Arc::clone(&self.sanctorale), self.temporale.options().clone())?
                .celebrations(tomorrow)
        };
        let Some(following) = following.into_iter().next() else {
            return Ok(None);
        };

        let has_first_vespers = following.rank.is_solemnity()
            || following.rank.is_sunday()
            || (following.rank == Rank::FeastLord && tomorrow.weekday() == Weekday::Sun);

        if has_first_vespers && following.rank.outranks(&today.rank) {
            Ok(Some(following))
        } else {
            Ok(None)
        }
    }
}
