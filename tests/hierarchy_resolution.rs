//! Resolution of calendar hierarchies, end to end through the library API

mod fixtures;

use chrono::NaiveDate;
use fixtures::{date, fixture, node};
use ordo::definition::build_definition_tree;
use ordo::{Record, Tree, TreeCalendar, TreeReducer};
use ordo_liturgy::{LoadError, TemporaleOptions};

fn reduce(spec: &Tree<ordo::CalendarSpec>, date: NaiveDate) -> Record {
    let definitions = build_definition_tree(spec).unwrap();
    let calendar = TreeCalendar::bind(&definitions, 2024, &TemporaleOptions::default()).unwrap();
    TreeReducer::new().reduce(&calendar.day(date).unwrap()).unwrap()
}

fn titles(entry: &ordo::Entry) -> Vec<&str> {
    entry.celebrations().iter().map(|c| c.title.as_str()).collect()
}

#[test]
fn test_inherited_celebration_reported_once_at_child() {
    let spec = node("Nation", &["parent.txt"]).with_children(vec![node("Province", &[])]);
    let record = reduce(&spec, date(2025, 7, 16));

    assert_eq!(record.entries.len(), 1);
    let entry = &record.entries[0];
    assert_eq!(entry.title, "Province");
    assert_eq!(entry.order, 0);
    assert!(titles(entry).contains(&"A"));
}

#[test]
fn test_child_override_replaces_inherited_celebration() {
    let spec = node("Nation", &["parent.txt"])
        .with_children(vec![node("Province", &["child_override.txt"])]);
    let record = reduce(&spec, date(2025, 7, 16));

    let province: Vec<_> = record
        .entries
        .iter()
        .filter(|e| e.title == "Province")
        .collect();
    assert_eq!(province.len(), 1);
    assert_eq!(titles(province[0]), ["B"]);

    // the nation keeps its own observance as a separate entry
    assert_eq!(record.entries[0].title, "Nation");
    assert!(titles(&record.entries[0]).contains(&"A"));
    assert!(record.entries[1].nth_entry());
}

#[test]
fn test_later_artefacts_override_earlier() {
    let a_then_b = node("Diocese", &["parent.txt", "child_override.txt"]);
    let record = reduce(&a_then_b, date(2025, 7, 16));
    assert_eq!(titles(&record.entries[0]), ["B"]);

    let b_then_a = node("Diocese", &["child_override.txt", "parent.txt"]);
    let record = reduce(&b_then_a, date(2025, 7, 16));
    assert!(titles(&record.entries[0]).contains(&"A"));
    assert!(!titles(&record.entries[0]).contains(&"B"));
}

#[test]
fn test_missing_file_fails_tree_construction() {
    let mut spec = node("Nation", &["parent.txt"]);
    spec.push(Tree::new(
        "Diocese",
        ordo::CalendarSpec {
            artefacts: vec![fixture("does_not_exist.txt")],
        },
    ));

    let err = build_definition_tree(&spec).unwrap_err();
    match err {
        LoadError::FileNotFound(path) => assert!(path.ends_with("does_not_exist.txt")),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn test_trees_isomorphic_for_every_date() {
    let spec = node("Nation", &["parent.txt"]).with_children(vec![
        node("Province", &["child_override.txt"])
            .with_children(vec![node("Diocese", &["child_other_date.txt"])]),
        node("Other Province", &[]),
    ]);
    let definitions = build_definition_tree(&spec).unwrap();
    let calendar = TreeCalendar::bind(&definitions, 2024, &TemporaleOptions::default()).unwrap();

    assert!(spec.same_shape(&definitions));
    assert!(spec.same_shape(calendar.calendars()));
    for days in calendar.days() {
        let days = days.unwrap();
        assert!(spec.same_shape(&days));
        assert_eq!(days.len(), 4);
    }
}

#[test]
fn test_identical_children_suppress_parent_every_date() {
    let spec = node("Nation", &["parent.txt"])
        .with_children(vec![node("Province", &[]), node("Other Province", &[])]);
    let definitions = build_definition_tree(&spec).unwrap();
    let calendar = TreeCalendar::bind(&definitions, 2024, &TemporaleOptions::default()).unwrap();
    let reducer = TreeReducer::new();

    for days in calendar.days() {
        let record = reducer.reduce(&days.unwrap()).unwrap();
        let localities: Vec<_> = record.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(localities, ["Province", "Other Province"], "{}", record.date);
    }
}

#[test]
fn test_grandchild_inherits_through_parent() {
    let spec = node("Nation", &["parent.txt"]).with_children(vec![node("Province", &[])
        .with_children(vec![node("Diocese", &["child_other_date.txt"])])]);

    // July 16 inherited from the nation down to the diocese
    let record = reduce(&spec, date(2025, 7, 16));
    assert_eq!(record.entries.len(), 1);
    assert_eq!(record.entries[0].title, "Diocese");
    assert!(titles(&record.entries[0]).contains(&"A"));

    // August 5 proper to the diocese: the province reports the common day
    let record = reduce(&spec, date(2025, 8, 5));
    let localities: Vec<_> = record.entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(localities, ["Province", "Diocese"]);
    assert_eq!(titles(&record.entries[1]), ["C"]);
}
