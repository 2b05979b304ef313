#![allow(clippy::unwrap_used)]

use super::*;

fn make_txn(category: &str, amount: f64, store: &str) -> Transaction {
    Transaction {
        date: "2024-02-10".into(),
        amount,
        category: category.into(),
        location: "Main St".into(),
        store: store.into(),
        id: "7".into(),
    }
}

#[test]
fn test_export_writes_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let txns = vec![
        make_txn("Food", 12.5, "Bakery"),
        make_txn("Fun", 3.0, "Arcade, Inc"),
    ];

    let count = export_transactions(&txns, &path).unwrap();
    assert_eq!(count, 2);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "date,amount,category,location,store,id");
    assert_eq!(lines[1], "2024-02-10,12.5,Food,Main St,Bakery,7");
    assert_eq!(lines[2], "2024-02-10,3.0,Fun,Main St,\"Arcade, Inc\",7");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_export_empty_still_has_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    assert_eq!(export_transactions(&[], &path).unwrap(), 0);
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim_end(), "date,amount,category,location,store,id");
}

#[test]
fn test_export_bad_directory_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    assert!(export_transactions(&[], &path).is_err());
}

#[test]
fn test_shellexpand_plain_path_unchanged() {
    assert_eq!(shellexpand("/tmp/out.csv"), "/tmp/out.csv");
    assert_eq!(shellexpand("out.csv"), "out.csv");
}

#[test]
fn test_shellexpand_home() {
    let expanded = shellexpand("~/out.csv");
    assert!(expanded.ends_with("/out.csv"));
    assert!(!expanded.starts_with('~'));
}
