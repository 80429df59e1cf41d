//! Unit tests for list parsing and snapshot semantics.
//!
//! Parsing splits on `'\n'` only and keeps every line as written.

use extension_gate::list::loader::parse_lines;
use extension_gate::models::list::{ListKind, ListSnapshot};

fn entries(content: &str) -> Vec<String> {
    parse_lines(content).expect("parse").entries().to_vec()
}

#[test]
fn splits_on_newlines_in_file_order() {
    assert_eq!(entries("beta\nacme\ngamma"), vec!["beta", "acme", "gamma"]);
}

#[test]
fn trailing_newline_yields_empty_entry() {
    assert_eq!(entries("acme\n"), vec!["acme", ""]);
}

#[test]
fn empty_content_is_a_single_empty_entry() {
    let snapshot = parse_lines("").expect("parse");
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.contains(""));
    assert!(!snapshot.contains("acme"));
}

#[test]
fn whitespace_and_case_are_preserved() {
    let snapshot = parse_lines(" acme\nACME\r\nbeta ").expect("parse");

    assert!(snapshot.contains(" acme"));
    assert!(snapshot.contains("ACME\r"));
    assert!(snapshot.contains("beta "));
    assert!(!snapshot.contains("acme"));
    assert!(!snapshot.contains("ACME"));
    assert!(!snapshot.contains("beta"));
}

#[test]
fn duplicates_are_kept_in_entries() {
    let snapshot = parse_lines("acme\nacme").expect("parse");
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.contains("acme"));
}

#[test]
fn default_snapshot_is_empty() {
    let snapshot = ListSnapshot::default();
    assert!(snapshot.is_empty());
    assert!(!snapshot.contains(""));
}

#[test]
fn snapshots_compare_by_entries() {
    let a = parse_lines("acme\nbeta").expect("parse");
    let b: ListSnapshot = vec!["acme".to_owned(), "beta".to_owned()].into_iter().collect();
    let c = parse_lines("beta\nacme").expect("parse");

    assert_eq!(a, b);
    assert_ne!(a, c, "order is part of snapshot identity");
}

#[test]
fn list_kinds_have_distinct_default_files() {
    let names = ListKind::ALL.map(ListKind::default_file_name);
    assert_eq!(
        names,
        [
            ".vscode_allowed_extension_publishers",
            ".vscode_allowed_extension_packages",
            ".vscode_prohibited_extension_packages",
        ]
    );
    assert_eq!(ListKind::ProhibitedPackages.to_string(), "prohibited_packages");
}
