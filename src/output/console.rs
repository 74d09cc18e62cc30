//! Plain-text report

use std::io::Write;

use chrono::NaiveDate;
use ordo_liturgy::Season;

use super::{OutputError, Outputter};
use crate::record::Record;

/// Writes a plain-text ordo to any writer
pub struct ConsoleOutputter<W: Write> {
    out: W,
    title: String,
    year: i32,
}

impl<W: Write> ConsoleOutputter<W> {
    pub fn new(out: W, title: impl Into<String>, year: i32) -> Self {
        Self {
            out,
            title: title.into(),
            year,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Outputter for ConsoleOutputter<W> {
    fn prepare(&mut self) -> Result<(), OutputError> {
        writeln!(self.out, "{}", self.title)?;
        writeln!(self.out, "{}/{}", self.year, self.year + 1)?;
        Ok(())
    }

    fn before_season(&mut self, season: Season) -> Result<(), OutputError> {
        writeln!(self.out)?;
        writeln!(self.out, "== {} ==", season)?;
        Ok(())
    }

    fn before_month(&mut self, date: NaiveDate) -> Result<(), OutputError> {
        writeln!(self.out)?;
        writeln!(self.out, "-- {} --", date.format("%B %Y"))?;
        Ok(())
    }

    fn append(&mut self, record: &Record) -> Result<(), OutputError> {
        let several = record.entries.len() > 1;

        for entry in &record.entries {
            let date = if entry.nth_entry() {
                String::new()
            } else {
                record.date.format("%e %a").to_string()
            };

            if several {
                writeln!(self.out, "{:<7} {}", date, entry.heading())?;
            }
            for (i, celebration) in entry.celebrations().iter().enumerate() {
                let lead = if several || i > 0 { "" } else { date.as_str() };
                writeln!(
                    self.out,
                    "{:<7} {} ({}, {})",
                    lead,
                    celebration.title,
                    celebration.rank.description(),
                    celebration.colour
                )?;
            }
            if let Some(note) = entry.vespers_note() {
                writeln!(self.out, "{:<7} {}", "", note)?;
            }
            if let Some(note) = entry.compline_note() {
                writeln!(self.out, "{:<7} {}", "", note)?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Entry;
    use ordo_liturgy::{Celebration, Colour, Day, Rank};

    fn record(entries: &[(&str, &str)]) -> Record {
        let date = NaiveDate::from_ymd_opt(2025, 7, 16).unwrap();
        Record {
            date,
            season: Season::Ordinary,
            entries: entries
                .iter()
                .enumerate()
                .map(|(order, (locality, title))| Entry {
                    order,
                    title: locality.to_string(),
                    day: Day {
                        date,
                        season: Season::Ordinary,
                        season_week: 15,
                        celebrations: vec![Celebration::new(*title, Rank::MemorialOptional, Colour::White)],
                        vespers: None,
                    },
                })
                .collect(),
        }
    }

    fn render(f: impl FnOnce(&mut ConsoleOutputter<Vec<u8>>)) -> String {
        let mut out = ConsoleOutputter::new(Vec::new(), "Ordo", 2024);
        f(&mut out);
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_prepare_prints_title() {
        let text = render(|o| o.prepare().unwrap());
        assert_eq!(text, "Ordo\n2024/2025\n");
    }

    #[test]
    fn test_single_entry_has_no_heading() {
        let text = render(|o| o.append(&record(&[("Diocese", "Our Lady of Mount Carmel")])).unwrap());
        assert!(text.contains("16 Wed"));
        assert!(text.contains("Our Lady of Mount Carmel (optional memorial, white)"));
        assert!(!text.contains("Diocese:"));
    }

    #[test]
    fn test_several_entries_show_headings_once_dated() {
        let text = render(|o| {
            o.append(&record(&[("Nation", "A"), ("Province", "B")]))
                .unwrap()
        });
        assert!(text.contains("Nation:"));
        assert!(text.contains("Province:"));
        assert_eq!(text.matches("16 Wed").count(), 1);
    }

    #[test]
    fn test_markers() {
        let text = render(|o| {
            o.before_season(Season::Advent).unwrap();
            o.before_month(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap())
                .unwrap();
        });
        assert!(text.contains("== Advent =="));
        assert!(text.contains("-- December 2024 --"));
    }
}
