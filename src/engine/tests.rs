#![allow(clippy::unwrap_used, clippy::panic)]

use super::*;
use crate::store::{Collection, DefaultReason, Loaded};

fn cat(name: &str, amount: f64) -> Category {
    Category::new(name.into(), amount)
}

fn txn(category: &str, amount: f64) -> Transaction {
    Transaction {
        date: "2024-03-01".into(),
        amount,
        category: category.into(),
        location: String::new(),
        store: String::new(),
        id: String::new(),
    }
}

fn draft(category: &str, amount: &str) -> TransactionDraft {
    TransactionDraft {
        date: "2024-03-01".into(),
        amount: amount.into(),
        category: category.into(),
        location: "Downtown".into(),
        store: "Corner Shop".into(),
        id: "42".into(),
    }
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_basic() {
    assert_eq!(parse_amount("12.50"), Some(12.5));
    assert_eq!(parse_amount("  7 "), Some(7.0));
    assert_eq!(parse_amount("-3"), Some(-3.0));
}

#[test]
fn test_parse_amount_currency_formatting() {
    assert_eq!(parse_amount("$1,234.56"), Some(1234.56));
}

#[test]
fn test_parse_amount_rejects_garbage() {
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("   "), None);
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount("$"), None);
}

#[test]
fn test_parse_amount_rejects_non_finite() {
    assert_eq!(parse_amount("NaN"), None);
    assert_eq!(parse_amount("inf"), None);
    assert_eq!(parse_amount("1e400"), None);
}

// ── upsert_category ───────────────────────────────────────────

#[test]
fn test_upsert_inserts_new() {
    let mut cats = Vec::new();
    assert_eq!(upsert_category(&mut cats, "Food", 100.0), Upsert::Inserted);
    assert_eq!(cats, vec![cat("Food", 100.0)]);
}

#[test]
fn test_upsert_case_insensitive_collision() {
    let mut cats = vec![cat("Steak", 50.0)];
    assert_eq!(upsert_category(&mut cats, "steak", 75.0), Upsert::Updated);
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0].name(), "Steak");
    assert_eq!(cats[0].amount, 75.0);
}

#[test]
fn test_upsert_renormalizes_stored_name() {
    // Entries written by older versions may not be normalized.
    let mut cats = vec![cat("STEAK", 50.0)];
    upsert_category(&mut cats, "Steak", 60.0);
    assert_eq!(cats[0].name(), "Steak");
    assert_eq!(cats[0].key(), "steak");
}

#[test]
fn test_upsert_is_idempotent() {
    let mut cats = vec![cat("Rent", 900.0)];
    upsert_category(&mut cats, "Food", 100.0);
    upsert_category(&mut cats, "Food", 100.0);
    let food: Vec<_> = cats.iter().filter(|c| c.key() == "food").collect();
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].amount, 100.0);
}

#[test]
fn test_upsert_last_amount_wins() {
    let mut cats = Vec::new();
    upsert_category(&mut cats, "Food", 100.0);
    upsert_category(&mut cats, "FOOD", 20.0);
    assert_eq!(cats, vec![cat("Food", 20.0)]);
}

#[test]
fn test_upsert_keeps_position() {
    let mut cats = vec![cat("Food", 1.0), cat("Rent", 2.0), cat("Fun", 3.0)];
    upsert_category(&mut cats, "rent", 5.0);
    let names: Vec<&str> = cats.iter().map(|c| c.name()).collect();
    assert_eq!(names, ["Food", "Rent", "Fun"]);
}

// ── validate_transaction / apply_transaction ──────────────────

#[test]
fn test_validate_normalizes_and_trims_category() {
    let t = validate_transaction(&draft("  gROCERIES ", "4")).unwrap();
    assert_eq!(t.category, "Groceries");
    assert_eq!(t.amount, 4.0);
    assert_eq!(t.store, "Corner Shop");
    assert_eq!(t.id, "42");
}

#[test]
fn test_validate_rejects_empty_category() {
    assert_eq!(
        validate_transaction(&draft("   ", "4")),
        Err(Rejection::EmptyCategory)
    );
}

#[test]
fn test_validate_rejects_bad_amount() {
    assert_eq!(
        validate_transaction(&draft("Food", "four")),
        Err(Rejection::InvalidAmount)
    );
}

#[test]
fn test_apply_creates_missing_category() {
    let mut cats = Vec::new();
    let mut txns = Vec::new();
    assert!(apply_transaction(&mut cats, &mut txns, txn("Travel", 20.0)));
    assert_eq!(cats, vec![cat("Travel", 0.0)]);
    assert_eq!(txns.len(), 1);
}

#[test]
fn test_apply_existing_category_untouched() {
    let mut cats = vec![cat("Food", 100.0)];
    let mut txns = Vec::new();
    assert!(!apply_transaction(&mut cats, &mut txns, txn("Food", 5.0)));
    assert_eq!(cats, vec![cat("Food", 100.0)]);
}

// ── aggregate_spend ───────────────────────────────────────────

#[test]
fn test_aggregate_sums_per_category() {
    let rows = aggregate_spend(
        &[cat("Food", 100.0)],
        &[txn("Food", 30.0), txn("Food", 45.0)],
    );
    assert_eq!(
        rows,
        vec![SpendRow {
            name: "Food".into(),
            budgeted: 100.0,
            spent: 75.0,
            over: false,
        }]
    );
}

#[test]
fn test_aggregate_over_budget_flag() {
    let rows = aggregate_spend(&[cat("Food", 50.0)], &[txn("Food", 50.01)]);
    assert!(rows[0].over);
}

#[test]
fn test_aggregate_equal_is_not_over() {
    let rows = aggregate_spend(&[cat("Food", 50.0)], &[txn("Food", 50.0)]);
    assert!(!rows[0].over);
    assert_eq!(rows[0].remaining(), 0.0);
}

#[test]
fn test_aggregate_no_transactions_spent_zero() {
    let rows = aggregate_spend(&[cat("Food", 10.0), cat("Rent", 0.0)], &[]);
    assert!(rows.iter().all(|r| r.spent == 0.0 && !r.over));
}

#[test]
fn test_aggregate_preserves_category_order() {
    let cats = [cat("Rent", 900.0), cat("Food", 100.0), cat("Fun", 50.0)];
    let txns = [txn("Fun", 1.0), txn("Food", 2.0), txn("Rent", 3.0)];
    let names: Vec<String> = aggregate_spend(&cats, &txns)
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, ["Rent", "Food", "Fun"]);
}

#[test]
fn test_aggregate_orphaned_transactions_excluded() {
    let rows = aggregate_spend(
        &[cat("Food", 100.0)],
        &[txn("Food", 10.0), txn("FOOD", 99.0), txn("Gone", 5.0)],
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].spent, 10.0);
}

#[test]
fn test_aggregate_negative_amounts_are_summed() {
    let rows = aggregate_spend(&[cat("Food", 10.0)], &[txn("Food", 15.0), txn("Food", -8.0)]);
    assert_eq!(rows[0].spent, 7.0);
    assert!(!rows[0].over);
}

#[test]
fn test_totals() {
    let rows = aggregate_spend(
        &[cat("Food", 100.0), cat("Fun", 10.0)],
        &[txn("Food", 40.0), txn("Fun", 25.0)],
    );
    let t = totals(&rows);
    assert_eq!(t.budgeted, 110.0);
    assert_eq!(t.spent, 65.0);
    assert_eq!(t.over_count, 1);
}

// ── Store-backed submissions ──────────────────────────────────

#[test]
fn test_set_budget_persists() {
    let store = Store::open_in_memory().unwrap();
    let outcome = set_budget(&store, "  food ", "100").unwrap();
    assert_eq!(outcome, Submission::Accepted(Upsert::Inserted));
    assert_eq!(store.categories().unwrap(), vec![cat("Food", 100.0)]);
}

#[test]
fn test_set_budget_updates_existing() {
    let store = Store::open_in_memory().unwrap();
    set_budget(&store, "Steak", "50").unwrap();
    let outcome = set_budget(&store, "steak", "75").unwrap();
    assert_eq!(outcome, Submission::Accepted(Upsert::Updated));
    assert_eq!(store.categories().unwrap(), vec![cat("Steak", 75.0)]);
}

#[test]
fn test_set_budget_rejects_empty_name() {
    let store = Store::open_in_memory().unwrap();
    let outcome = set_budget(&store, "   ", "10").unwrap();
    assert_eq!(outcome, Submission::Rejected(Rejection::EmptyCategory));
    let loaded: Loaded<Category> = store.load(Collection::Categories).unwrap();
    assert_eq!(loaded, Loaded::Defaulted(DefaultReason::Absent));
}

#[test]
fn test_set_budget_rejects_bad_and_negative_amounts() {
    let store = Store::open_in_memory().unwrap();
    for raw in ["", "ten", "-5"] {
        let outcome = set_budget(&store, "Food", raw).unwrap();
        assert_eq!(outcome, Submission::Rejected(Rejection::InvalidAmount));
    }
    assert!(store.categories().unwrap().is_empty());
}

#[test]
fn test_record_transaction_creates_category() {
    let store = Store::open_in_memory().unwrap();
    let outcome = record_transaction(&store, &draft("Travel", "20")).unwrap();
    match outcome {
        Submission::Accepted(recorded) => {
            assert!(recorded.category_created);
            assert_eq!(recorded.transaction.category, "Travel");
        }
        Submission::Rejected(r) => panic!("unexpected rejection: {r}"),
    }
    assert_eq!(store.categories().unwrap(), vec![cat("Travel", 0.0)]);
    let rows = projection(&store).unwrap();
    assert_eq!(rows[0].spent, 20.0);
    assert!(rows[0].over);
}

#[test]
fn test_record_transaction_matches_existing_case_insensitively() {
    let store = Store::open_in_memory().unwrap();
    set_budget(&store, "Food", "100").unwrap();
    record_transaction(&store, &draft("FOOD", "30")).unwrap();
    record_transaction(&store, &draft("food", "45")).unwrap();
    assert_eq!(store.categories().unwrap().len(), 1);
    assert_eq!(
        projection(&store).unwrap(),
        vec![SpendRow {
            name: "Food".into(),
            budgeted: 100.0,
            spent: 75.0,
            over: false,
        }]
    );
}

#[test]
fn test_record_transaction_passes_free_text_through() {
    let store = Store::open_in_memory().unwrap();
    record_transaction(&store, &draft("Food", "3")).unwrap();
    let stored = &store.transactions().unwrap()[0];
    assert_eq!(stored.date, "2024-03-01");
    assert_eq!(stored.location, "Downtown");
    assert_eq!(stored.store, "Corner Shop");
    assert_eq!(stored.id, "42");
}

#[test]
fn test_rejected_transaction_leaves_collections_unchanged() {
    let store = Store::open_in_memory().unwrap();
    set_budget(&store, "Food", "100").unwrap();
    record_transaction(&store, &draft("Food", "10")).unwrap();
    let cats_before = store.categories().unwrap();
    let txns_before = store.transactions().unwrap();

    let outcome = record_transaction(&store, &draft("Brand new", "not a number")).unwrap();
    assert_eq!(outcome, Submission::Rejected(Rejection::InvalidAmount));

    assert_eq!(store.categories().unwrap(), cats_before);
    assert_eq!(store.transactions().unwrap(), txns_before);
}

#[test]
fn test_record_transaction_recovers_from_malformed_store() {
    let store = Store::open_in_memory().unwrap();
    store
        .put_raw_for_test(Collection::Transactions, "[{broken")
        .unwrap();
    record_transaction(&store, &draft("Food", "5")).unwrap();
    assert_eq!(store.transactions().unwrap().len(), 1);
}

#[test]
fn test_projection_order_follows_categories_not_transactions() {
    let store = Store::open_in_memory().unwrap();
    set_budget(&store, "Rent", "900").unwrap();
    set_budget(&store, "Food", "100").unwrap();
    record_transaction(&store, &draft("Fun", "5")).unwrap();
    record_transaction(&store, &draft("Food", "5")).unwrap();
    let names: Vec<String> = projection(&store).unwrap().into_iter().map(|r| r.name).collect();
    assert_eq!(names, ["Rent", "Food", "Fun"]);
}
