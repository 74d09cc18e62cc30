//! Celebrations, ranks, liturgical colours and seasons.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rank of a liturgical day.
///
/// Variants are declared in order of precedence (Table of Liturgical Days):
/// a variant declared earlier outranks every variant declared after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    /// Easter Triduum
    Triduum,
    /// Christmas, Epiphany, Ascension, Pentecost
    Primary,
    /// Sundays of Advent, Lent and Easter
    PrivilegedSunday,
    /// Ash Wednesday, weekdays of Holy Week, days within the Easter octave
    PrimaryWeekday,
    /// Solemnities of the general calendar
    SolemnityGeneral,
    /// Proper solemnities
    SolemnityProper,
    /// Feasts of the Lord
    FeastLord,
    /// Sundays of Christmas Time and Ordinary Time
    Sunday,
    /// Feasts of the general calendar
    FeastGeneral,
    /// Proper feasts
    FeastProper,
    /// Advent weekdays December 17-24, days within the Christmas octave, Lent weekdays
    FerialPrivileged,
    /// Obligatory memorials of the general calendar
    MemorialGeneral,
    /// Proper obligatory memorials
    MemorialProper,
    /// Optional memorials
    MemorialOptional,
    /// Weekdays
    Ferial,
    /// Memorials impeded by a privileged weekday
    Commemoration,
}

impl Rank {
    /// Whether this rank takes precedence over `other`
    pub fn outranks(&self, other: &Rank) -> bool {
        self < other
    }

    /// Numeric priority as printed in the Table of Liturgical Days
    pub fn priority(&self) -> &'static str {
        match self {
            Rank::Triduum => "1.1",
            Rank::Primary | Rank::PrivilegedSunday | Rank::PrimaryWeekday => "1.2",
            Rank::SolemnityGeneral => "1.3",
            Rank::SolemnityProper => "1.4",
            Rank::FeastLord => "2.5",
            Rank::Sunday => "2.6",
            Rank::FeastGeneral => "2.7",
            Rank::FeastProper => "2.8",
            Rank::FerialPrivileged => "2.9",
            Rank::MemorialGeneral => "3.10",
            Rank::MemorialProper => "3.11",
            Rank::MemorialOptional => "3.12",
            Rank::Ferial => "3.13",
            Rank::Commemoration => "4.0",
        }
    }

    pub fn is_solemnity(&self) -> bool {
        matches!(
            self,
            Rank::Primary | Rank::SolemnityGeneral | Rank::SolemnityProper
        )
    }

    pub fn is_sunday(&self) -> bool {
        matches!(self, Rank::PrivilegedSunday | Rank::Sunday)
    }

    pub fn is_feast(&self) -> bool {
        matches!(self, Rank::FeastLord | Rank::FeastGeneral | Rank::FeastProper)
    }

    pub fn is_memorial(&self) -> bool {
        matches!(
            self,
            Rank::MemorialGeneral | Rank::MemorialProper | Rank::MemorialOptional
        )
    }

    pub fn is_ferial(&self) -> bool {
        matches!(
            self,
            Rank::Ferial | Rank::FerialPrivileged | Rank::PrimaryWeekday
        )
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Rank::Triduum => "Easter Triduum",
            Rank::Primary => "primary liturgical day",
            Rank::PrivilegedSunday => "privileged Sunday",
            Rank::PrimaryWeekday => "privileged weekday",
            Rank::SolemnityGeneral | Rank::SolemnityProper => "solemnity",
            Rank::FeastLord => "feast of the Lord",
            Rank::Sunday => "Sunday",
            Rank::FeastGeneral | Rank::FeastProper => "feast",
            Rank::FerialPrivileged => "privileged weekday",
            Rank::MemorialGeneral | Rank::MemorialProper => "memorial",
            Rank::MemorialOptional => "optional memorial",
            Rank::Ferial => "weekday",
            Rank::Commemoration => "commemoration",
        }
    }
}

/// Liturgical colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    White,
    Red,
    Green,
    Violet,
    Rose,
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "white"),
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
            Self::Violet => write!(f, "violet"),
            Self::Rose => write!(f, "rose"),
        }
    }
}

/// Liturgical season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Advent,
    Christmas,
    Lent,
    Triduum,
    Easter,
    Ordinary,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advent => write!(f, "Advent"),
            Self::Christmas => write!(f, "Christmas Time"),
            Self::Lent => write!(f, "Lent"),
            Self::Triduum => write!(f, "Easter Triduum"),
            Self::Easter => write!(f, "Easter Time"),
            Self::Ordinary => write!(f, "Ordinary Time"),
        }
    }
}

/// A single celebration: what is celebrated, how solemnly, in which colour
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Celebration {
    pub title: String,
    pub rank: Rank,
    pub colour: Colour,
}

impl Celebration {
    pub fn new(title: impl Into<String>, rank: Rank, colour: Colour) -> Self {
        Self {
            title: title.into(),
            rank,
            colour,
        }
    }

    /// Same celebration reduced to a commemoration
    pub fn as_commemoration(&self) -> Self {
        Self {
            title: self.title.clone(),
            rank: Rank::Commemoration,
            colour: self.colour,
        }
    }
}

impl fmt::Display for Celebration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.title, self.rank.description(), self.colour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(Rank::Triduum.outranks(&Rank::Primary));
        assert!(Rank::SolemnityGeneral.outranks(&Rank::Sunday));
        assert!(Rank::FeastLord.outranks(&Rank::Sunday));
        assert!(Rank::Sunday.outranks(&Rank::FeastGeneral));
        assert!(Rank::FerialPrivileged.outranks(&Rank::MemorialGeneral));
        assert!(!Rank::Ferial.outranks(&Rank::MemorialOptional));
        assert!(!Rank::Sunday.outranks(&Rank::Sunday));
    }

    #[test]
    fn test_rank_classes() {
        assert!(Rank::SolemnityProper.is_solemnity());
        assert!(!Rank::Triduum.is_solemnity());
        assert!(Rank::PrivilegedSunday.is_sunday());
        assert!(Rank::FeastLord.is_feast());
        assert!(Rank::MemorialOptional.is_memorial());
        assert!(Rank::PrimaryWeekday.is_ferial());
    }

    #[test]
    fn test_season_display() {
        assert_eq!(Season::Ordinary.to_string(), "Ordinary Time");
        assert_eq!(Season::Advent.to_string(), "Advent");
    }

    #[test]
    fn test_commemoration_keeps_title() {
        let c = Celebration::new("Saint Lucy", Rank::MemorialGeneral, Colour::Red);
        let comm = c.as_commemoration();
        assert_eq!(comm.title, "Saint Lucy");
        assert_eq!(comm.rank, Rank::Commemoration);
    }
}
