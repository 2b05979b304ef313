mod aggregate;

pub(crate) use aggregate::{aggregate_spend, totals, SpendRow, Totals};

use anyhow::Result;

use crate::models::{normalize, Category, Transaction, TransactionDraft};
use crate::store::Store;

/// Why a submission was turned away before anything was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    EmptyCategory,
    InvalidAmount,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "category name is required"),
            Self::InvalidAmount => write!(f, "amount must be a valid number"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Upsert {
    Inserted,
    Updated,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Submission<T> {
    Accepted(T),
    Rejected(Rejection),
}

/// What a recorded transaction did to the collections.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Recorded {
    pub(crate) transaction: Transaction,
    pub(crate) category_created: bool,
}

/// Parse a form amount. Accepts a leading `$` and thousands separators;
/// anything that is not a finite number is rejected.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    let cleaned = cleaned.strip_prefix('$').unwrap_or(&cleaned);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Insert or update a category keyed by case-insensitive name. The stored
/// name is replaced by the normalized form of `name`.
pub(crate) fn upsert_category(categories: &mut Vec<Category>, name: &str, amount: f64) -> Upsert {
    let name = normalize(name);
    match Category::position_by_name(categories, &name) {
        Some(idx) => {
            let existing = &mut categories[idx];
            existing.rename(name);
            existing.amount = amount;
            Upsert::Updated
        }
        None => {
            categories.push(Category::new(name, amount));
            Upsert::Inserted
        }
    }
}

/// Trim, normalize and validate raw transaction input.
pub(crate) fn validate_transaction(draft: &TransactionDraft) -> Result<Transaction, Rejection> {
    let category = normalize(draft.category.trim());
    if category.is_empty() {
        return Err(Rejection::EmptyCategory);
    }
    let amount = parse_amount(&draft.amount).ok_or(Rejection::InvalidAmount)?;
    Ok(Transaction {
        date: draft.date.clone(),
        amount,
        category,
        location: draft.location.clone(),
        store: draft.store.clone(),
        id: draft.id.clone(),
    })
}

/// Append `txn`, creating a zero-budget category first when its category is
/// unknown. Returns whether a category was created.
pub(crate) fn apply_transaction(
    categories: &mut Vec<Category>,
    transactions: &mut Vec<Transaction>,
    txn: Transaction,
) -> bool {
    let created = Category::find_by_name(categories, &txn.category).is_none();
    if created {
        categories.push(Category::new(txn.category.clone(), 0.0));
    }
    transactions.push(txn);
    created
}

// ── Store-backed submissions ─────────────────────────────────

/// Handle a budget form submission.
pub(crate) fn set_budget(store: &Store, raw_name: &str, raw_amount: &str) -> Result<Submission<Upsert>> {
    let name = normalize(raw_name.trim());
    if name.is_empty() {
        tracing::info!(reason = %Rejection::EmptyCategory, "budget submission rejected");
        return Ok(Submission::Rejected(Rejection::EmptyCategory));
    }
    let amount = match parse_amount(raw_amount) {
        Some(a) if a >= 0.0 => a,
        _ => {
            tracing::info!(reason = %Rejection::InvalidAmount, raw_amount, "budget submission rejected");
            return Ok(Submission::Rejected(Rejection::InvalidAmount));
        }
    };

    let mut categories = store.categories()?;
    let outcome = upsert_category(&mut categories, &name, amount);
    store.save_categories(&categories)?;
    tracing::info!(category = %name, amount, ?outcome, "budget set");
    Ok(Submission::Accepted(outcome))
}

/// Handle a transaction form submission.
pub(crate) fn record_transaction(store: &Store, draft: &TransactionDraft) -> Result<Submission<Recorded>> {
    let txn = match validate_transaction(draft) {
        Ok(txn) => txn,
        Err(reason) => {
            tracing::info!(%reason, "transaction submission rejected");
            return Ok(Submission::Rejected(reason));
        }
    };

    let mut categories = store.categories()?;
    let mut transactions = store.transactions()?;
    let category_created = apply_transaction(&mut categories, &mut transactions, txn.clone());
    if category_created {
        store.save_categories(&categories)?;
        tracing::info!(category = %txn.category, "category created from transaction");
    }
    store.save_transactions(&transactions)?;
    tracing::info!(category = %txn.category, amount = txn.amount, "transaction recorded");

    Ok(Submission::Accepted(Recorded {
        transaction: txn,
        category_created,
    }))
}

/// Load both collections and compute the budgeted vs. actual rows.
pub(crate) fn projection(store: &Store) -> Result<Vec<SpendRow>> {
    let categories = store.categories()?;
    let transactions = store.transactions()?;
    Ok(aggregate_spend(&categories, &transactions))
}

#[cfg(test)]
mod tests;
