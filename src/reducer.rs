//! Day tree reduction
//!
//! Collapses the per-locality day tree of one date into the entries worth
//! reporting. Every leaf locality is reported. An inner locality is
//! reported only when its celebrations differ from those of each of its
//! direct children; otherwise one of the children already reports it.
//! Entries keep the document order of the calendar tree.

use chrono::NaiveDate;
use ordo_liturgy::Day;

use crate::record::{Entry, Record};
use crate::tree::Tree;

/// Internal invariant violations between parallel trees
#[derive(Debug, thiserror::Error)]
pub enum ReduceError {
    #[error("structural mismatch: calendar '{node}' computed {found}, expected {expected}")]
    StructuralMismatch {
        node: String,
        expected: NaiveDate,
        found: NaiveDate,
    },
}

/// Reduces day trees to records
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeReducer;

impl TreeReducer {
    pub fn new() -> Self {
        Self
    }

    pub fn reduce(&self, days: &Tree<Day>) -> Result<Record, ReduceError> {
        let root = days.content();
        if let Some(node) = days.iter().find(|n| n.content().date != root.date) {
            return Err(ReduceError::StructuralMismatch {
                node: node.name().to_string(),
                expected: root.date,
                found: node.content().date,
            });
        }

        let mut entries = Vec::new();
        collect(days, &mut entries);

        Ok(Record {
            date: root.date,
            season: root.season,
            entries,
        })
    }
}

fn collect(node: &Tree<Day>, entries: &mut Vec<Entry>) {
    let day = node.content();
    let distinct = node
        .children()
        .iter()
        .all(|child| child.content().celebrations != day.celebrations);

    if distinct {
        entries.push(Entry {
            order: entries.len(),
            title: node.name().to_string(),
            day: day.clone(),
        });
    }

    for child in node.children() {
        collect(child, entries);
    }
}
