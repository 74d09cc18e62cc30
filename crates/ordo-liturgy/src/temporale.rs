//! Temporale: movable celebrations and seasons of a liturgical year
//!
//! Liturgical year `Y` starts on the first Sunday of Advent of civil
//! year `Y` and ends on the day before the first Sunday of Advent of
//! `Y + 1`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::celebration::{Celebration, Colour, Rank, Season};
use crate::error::CalendarError;

/// Earliest year the Gregorian computus is meaningful for
pub const MIN_YEAR: i32 = 1583;

/// Latest supported liturgical year
pub const MAX_YEAR: i32 = 9998;

/// Solemnities which a bishops' conference may move to a Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferableFeast {
    Epiphany,
    Ascension,
    CorpusChristi,
}

impl TransferableFeast {
    pub const ALL: [TransferableFeast; 3] = [
        TransferableFeast::Epiphany,
        TransferableFeast::Ascension,
        TransferableFeast::CorpusChristi,
    ];
}

impl fmt::Display for TransferableFeast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epiphany => write!(f, "Epiphany"),
            Self::Ascension => write!(f, "Ascension"),
            Self::CorpusChristi => write!(f, "Corpus Christi"),
        }
    }
}

impl FromStr for TransferableFeast {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|feast| feast.to_string() == s)
            .copied()
            .ok_or_else(|| {
                format!(
                    "cannot transfer '{}' to Sunday, transfer supported only for {}",
                    s,
                    Self::ALL.map(|f| f.to_string()).join(", ")
                )
            })
    }
}

/// Optional additions to the temporale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extension {
    /// Feast of Our Lord Jesus Christ, the Eternal High Priest (Thursday after Pentecost)
    ChristEternalPriest,
}

impl Extension {
    pub const ALL: [Extension; 1] = [Extension::ChristEternalPriest];
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChristEternalPriest => write!(f, "Christ Eternal Priest"),
        }
    }
}

impl FromStr for Extension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        Self::ALL
            .iter()
            .find(|ext| ext.to_string().replace(' ', "") == compact)
            .copied()
            .ok_or_else(|| {
                format!(
                    "unsupported temporale extension '{}', supported are {}",
                    s,
                    Self::ALL.map(|e| e.to_string()).join(", ")
                )
            })
    }
}

/// Temporale settings shared by every calendar of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaleOptions {
    #[serde(default)]
    pub transfer_to_sunday: Vec<TransferableFeast>,
    /// Transfers permitted but not imposed; recorded, not applied
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional_transfer_to_sunday: Vec<TransferableFeast>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

impl TemporaleOptions {
    pub fn transfers(&self, feast: TransferableFeast) -> bool {
        self.transfer_to_sunday.contains(&feast)
    }

    pub fn transfers_optionally(&self, feast: TransferableFeast) -> bool {
        self.optional_transfer_to_sunday.contains(&feast)
    }

    pub fn has_extension(&self, extension: Extension) -> bool {
        self.extensions.contains(&extension)
    }
}

/// Date of Easter Sunday (Gregorian computus)
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// First Sunday of Advent of the given civil year
pub fn first_advent_sunday(year: i32) -> Option<NaiveDate> {
    let christmas = NaiveDate::from_ymd_opt(year, 12, 25)?;
    let sunday_before = match christmas.weekday().num_days_from_sunday() {
        0 => christmas - Duration::days(7),
        w => christmas - Duration::days(w as i64),
    };
    Some(sunday_before - Duration::weeks(3))
}

fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

fn sunday_after(date: NaiveDate) -> NaiveDate {
    date + Duration::days(7 - date.weekday().num_days_from_sunday() as i64)
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Movable celebrations and seasons of one liturgical year
#[derive(Debug, Clone)]
pub struct Temporale {
    year: i32,
    options: TemporaleOptions,
    first_advent: NaiveDate,
    christmas: NaiveDate,
    holy_family: NaiveDate,
    mother_of_god: NaiveDate,
    epiphany: NaiveDate,
    baptism: NaiveDate,
    ash_wednesday: NaiveDate,
    easter: NaiveDate,
    ascension: NaiveDate,
    pentecost: NaiveDate,
    corpus_christi: NaiveDate,
    christ_king: NaiveDate,
    last_day: NaiveDate,
}

impl Temporale {
    pub fn new(year: i32, options: TemporaleOptions) -> Result<Self, CalendarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::InvalidYear(year));
        }
        let invalid = || CalendarError::InvalidYear(year);

        let first_advent = first_advent_sunday(year).ok_or_else(invalid)?;
        let next_advent = first_advent_sunday(year + 1).ok_or_else(invalid)?;
        let christmas = NaiveDate::from_ymd_opt(year, 12, 25).ok_or_else(invalid)?;
        let holy_family = match christmas.weekday() {
            Weekday::Sun => christmas + Duration::days(5),
            _ => sunday_after(christmas),
        };
        let mother_of_god = NaiveDate::from_ymd_opt(year + 1, 1, 1).ok_or_else(invalid)?;
        let jan2 = NaiveDate::from_ymd_opt(year + 1, 1, 2).ok_or_else(invalid)?;
        let jan6 = NaiveDate::from_ymd_opt(year + 1, 1, 6).ok_or_else(invalid)?;

        let epiphany = if options.transfers(TransferableFeast::Epiphany) {
            match jan2.weekday() {
                Weekday::Sun => jan2,
                _ => sunday_after(jan2),
            }
        } else {
            jan6
        };
        let baptism = if epiphany.day() >= 7 {
            epiphany + Duration::days(1)
        } else {
            sunday_after(jan6)
        };

        let easter = easter_sunday(year + 1).ok_or_else(invalid)?;
        let ascension = if options.transfers(TransferableFeast::Ascension) {
            easter + Duration::days(42)
        } else {
            easter + Duration::days(39)
        };
        let corpus_christi = if options.transfers(TransferableFeast::CorpusChristi) {
            easter + Duration::days(63)
        } else {
            easter + Duration::days(60)
        };

        Ok(Self {
            year,
            options,
            first_advent,
            christmas,
            holy_family,
            mother_of_god,
            epiphany,
            baptism,
            ash_wednesday: easter - Duration::days(46),
            easter,
            ascension,
            pentecost: easter + Duration::days(49),
            corpus_christi,
            christ_king: next_advent - Duration::days(7),
            last_day: next_advent - Duration::days(1),
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn options(&self) -> &TemporaleOptions {
        &self.options
    }

    pub fn start_date(&self) -> NaiveDate {
        self.first_advent
    }

    pub fn end_date(&self) -> NaiveDate {
        self.last_day
    }

    pub fn easter(&self) -> NaiveDate {
        self.easter
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_advent && date <= self.last_day
    }

    fn holy_thursday(&self) -> NaiveDate {
        self.easter - Duration::days(3)
    }

    fn palm_sunday(&self) -> NaiveDate {
        self.easter - Duration::days(7)
    }

    fn first_lent_sunday(&self) -> NaiveDate {
        self.ash_wednesday + Duration::days(4)
    }

    /// Season a date belongs to. Dates outside the year are attributed
    /// to the nearest season at the boundary.
    pub fn season(&self, date: NaiveDate) -> Season {
        if date < self.christmas {
            Season::Advent
        } else if date <= self.baptism {
            Season::Christmas
        } else if date < self.ash_wednesday {
            Season::Ordinary
        } else if date < self.holy_thursday() {
            Season::Lent
        } else if date < self.easter {
            Season::Triduum
        } else if date <= self.pentecost {
            Season::Easter
        } else {
            Season::Ordinary
        }
    }

    /// Week of the season a date falls in
    pub fn season_week(&self, date: NaiveDate) -> u32 {
        let weeks = |from: NaiveDate, to: NaiveDate| ((to - from).num_days() / 7) as u32;
        match self.season(date) {
            Season::Advent => weeks(self.first_advent, date) + 1,
            Season::Christmas => weeks(self.christmas, date) + 1,
            Season::Lent => {
                if date < self.first_lent_sunday() {
                    0
                } else {
                    weeks(self.first_lent_sunday(), date) + 1
                }
            }
            Season::Triduum => 1,
            Season::Easter => weeks(self.easter, date) + 1,
            Season::Ordinary => {
                if date < self.easter {
                    weeks(sunday_on_or_before(self.baptism), sunday_on_or_before(date)) + 1
                } else {
                    34 - weeks(sunday_on_or_before(date), self.christ_king)
                }
            }
        }
    }

    fn proper_celebration(&self, date: NaiveDate) -> Option<Celebration> {
        let e = self.easter;
        let c = if date == self.christmas {
            Celebration::new("The Nativity of the Lord", Rank::Primary, Colour::White)
        } else if date == self.holy_family {
            Celebration::new("The Holy Family of Jesus, Mary and Joseph", Rank::FeastLord, Colour::White)
        } else if date == self.mother_of_god {
            Celebration::new("Mary, the Holy Mother of God", Rank::SolemnityGeneral, Colour::White)
        } else if date == self.epiphany {
            Celebration::new("The Epiphany of the Lord", Rank::Primary, Colour::White)
        } else if date == self.baptism {
            Celebration::new("The Baptism of the Lord", Rank::FeastLord, Colour::White)
        } else if date == self.ash_wednesday {
            Celebration::new("Ash Wednesday", Rank::PrimaryWeekday, Colour::Violet)
        } else if date == self.palm_sunday() {
            Celebration::new("Palm Sunday of the Passion of the Lord", Rank::PrivilegedSunday, Colour::Red)
        } else if date == self.holy_thursday() {
            Celebration::new("Thursday of the Lord's Supper", Rank::Triduum, Colour::White)
        } else if date == e - Duration::days(2) {
            Celebration::new("Friday of the Passion of the Lord", Rank::Triduum, Colour::Red)
        } else if date == e - Duration::days(1) {
            Celebration::new("Holy Saturday", Rank::Triduum, Colour::Violet)
        } else if date == e {
            Celebration::new("Easter Sunday of the Resurrection of the Lord", Rank::Triduum, Colour::White)
        } else if date == self.ascension {
            Celebration::new("The Ascension of the Lord", Rank::Primary, Colour::White)
        } else if date == self.pentecost {
            Celebration::new("Pentecost Sunday", Rank::Primary, Colour::Red)
        } else if self.options.has_extension(Extension::ChristEternalPriest)
            && date == self.pentecost + Duration::days(4)
        {
            Celebration::new("Our Lord Jesus Christ, the Eternal High Priest", Rank::FeastLord, Colour::White)
        } else if date == self.pentecost + Duration::days(7) {
            Celebration::new("The Most Holy Trinity", Rank::SolemnityGeneral, Colour::White)
        } else if date == self.corpus_christi {
            Celebration::new("The Most Holy Body and Blood of Christ", Rank::SolemnityGeneral, Colour::White)
        } else if date == e + Duration::days(68) {
            Celebration::new("The Most Sacred Heart of Jesus", Rank::SolemnityGeneral, Colour::White)
        } else if date == e + Duration::days(69) {
            Celebration::new("The Immaculate Heart of the Blessed Virgin Mary", Rank::MemorialGeneral, Colour::White)
        } else if date == self.christ_king {
            Celebration::new("Our Lord Jesus Christ, King of the Universe", Rank::SolemnityGeneral, Colour::White)
        } else {
            return None;
        };
        Some(c)
    }

    /// Temporale celebration of a date
    pub fn get(&self, date: NaiveDate) -> Celebration {
        if let Some(c) = self.proper_celebration(date) {
            return c;
        }

        let weekday = date.weekday();
        let sunday = weekday == Weekday::Sun;
        let day_name = weekday_name(weekday);
        let week = self.season_week(date);

        match self.season(date) {
            Season::Advent => {
                if sunday {
                    let colour = if week == 3 { Colour::Rose } else { Colour::Violet };
                    Celebration::new(format!("{} Sunday of Advent", ordinal(week)), Rank::PrivilegedSunday, colour)
                } else if date.month() == 12 && date.day() >= 17 {
                    Celebration::new(
                        format!("{} of Advent, December {}", day_name, date.day()),
                        Rank::FerialPrivileged,
                        Colour::Violet,
                    )
                } else {
                    Celebration::new(
                        format!("{} of the {} week of Advent", day_name, ordinal(week)),
                        Rank::Ferial,
                        Colour::Violet,
                    )
                }
            }
            Season::Christmas => {
                let day_in_octave = (date - self.christmas).num_days() + 1;
                if sunday {
                    Celebration::new("2nd Sunday after the Nativity", Rank::Sunday, Colour::White)
                } else if day_in_octave <= 8 {
                    Celebration::new(
                        format!("{} day within the Octave of the Nativity", ordinal(day_in_octave as u32)),
                        Rank::FerialPrivileged,
                        Colour::White,
                    )
                } else {
                    Celebration::new(format!("{} of Christmas Time", day_name), Rank::Ferial, Colour::White)
                }
            }
            Season::Lent => {
                if sunday {
                    let colour = if week == 4 { Colour::Rose } else { Colour::Violet };
                    Celebration::new(format!("{} Sunday of Lent", ordinal(week)), Rank::PrivilegedSunday, colour)
                } else if date > self.palm_sunday() {
                    Celebration::new(format!("{} of Holy Week", day_name), Rank::PrimaryWeekday, Colour::Violet)
                } else if week == 0 {
                    Celebration::new(
                        format!("{} after Ash Wednesday", day_name),
                        Rank::FerialPrivileged,
                        Colour::Violet,
                    )
                } else {
                    Celebration::new(
                        format!("{} of the {} week of Lent", day_name, ordinal(week)),
                        Rank::FerialPrivileged,
                        Colour::Violet,
                    )
                }
            }
            // every day of the Triduum has a proper celebration
            Season::Triduum => Celebration::new(format!("{} of the Easter Triduum", day_name), Rank::Triduum, Colour::White),
            Season::Easter => {
                if sunday {
                    Celebration::new(format!("{} Sunday of Easter", ordinal(week)), Rank::PrivilegedSunday, Colour::White)
                } else if week == 1 {
                    Celebration::new(
                        format!("{} within the Octave of Easter", day_name),
                        Rank::PrimaryWeekday,
                        Colour::White,
                    )
                } else {
                    Celebration::new(
                        format!("{} of the {} week of Easter", day_name, ordinal(week)),
                        Rank::Ferial,
                        Colour::White,
                    )
                }
            }
            Season::Ordinary => {
                if sunday {
                    Celebration::new(format!("{} Sunday in Ordinary Time", ordinal(week)), Rank::Sunday, Colour::Green)
                } else {
                    Celebration::new(
                        format!("{} of the {} week in Ordinary Time", day_name, ordinal(week)),
                        Rank::Ferial,
                        Colour::Green,
                    )
                }
            }
        }
    }
}
