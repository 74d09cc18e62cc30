//! Ordo Liturgy
//!
//! Liturgical calendar primitives used by the ordo resolution engine:
//! - Sanctorale datasets (fixed-date celebrations) and their text format
//! - Layered merging of sanctorale datasets
//! - Packaged datasets bundled with the crate
//! - Temporale (movable celebrations and seasons) for a liturgical year
//! - Year-bound calendars answering "what is celebrated on date D"

pub mod calendar;
pub mod celebration;
pub mod error;
pub mod loader;
pub mod packaged;
pub mod sanctorale;
pub mod temporale;

pub use calendar::{Calendar, DateRange, Day};
pub use celebration::{Celebration, Colour, Rank, Season};
pub use error::{CalendarError, LoadError};
pub use loader::SanctoraleLoader;
pub use sanctorale::{MonthDay, Sanctorale, SanctoraleError};
pub use temporale::{Extension, Temporale, TemporaleOptions, TransferableFeast};
