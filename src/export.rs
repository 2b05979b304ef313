use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Transaction;

/// Write transactions to a CSV file with a header row, in stored order.
/// Returns the number of rows written.
pub(crate) fn export_transactions(transactions: &[Transaction], path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    if transactions.is_empty() {
        wtr.write_record(["date", "amount", "category", "location", "store", "id"])?;
    }
    for txn in transactions {
        wtr.serialize(txn).context("Failed to write CSV record")?;
    }
    wtr.flush().context("Failed to flush CSV file")?;

    tracing::info!(path = %path.display(), count = transactions.len(), "transactions exported");
    Ok(transactions.len())
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

pub(crate) fn default_export_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    let today = chrono::Local::now().format("%Y-%m-%d");
    format!("{home}/budgetwidget-export-{today}.csv")
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
