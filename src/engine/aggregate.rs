use std::collections::HashMap;

use crate::models::{Category, Transaction};

/// One render-ready row of the budgeted vs. actual view.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SpendRow {
    pub(crate) name: String,
    pub(crate) budgeted: f64,
    pub(crate) spent: f64,
    pub(crate) over: bool,
}

impl SpendRow {
    pub(crate) fn remaining(&self) -> f64 {
        self.budgeted - self.spent
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Totals {
    pub(crate) budgeted: f64,
    pub(crate) spent: f64,
    pub(crate) over_count: usize,
}

/// Sum transaction amounts per category, in category order.
///
/// Transactions are matched on the exact stored category string. A
/// transaction whose category matches no category name is left out of
/// every total.
pub(crate) fn aggregate_spend(categories: &[Category], transactions: &[Transaction]) -> Vec<SpendRow> {
    let mut spent_by_name: HashMap<&str, f64> = HashMap::new();
    for txn in transactions {
        *spent_by_name.entry(txn.category.as_str()).or_insert(0.0) += txn.amount;
    }

    categories
        .iter()
        .map(|cat| {
            let spent = spent_by_name.get(cat.name()).copied().unwrap_or(0.0);
            SpendRow {
                name: cat.name().to_string(),
                budgeted: cat.amount,
                spent,
                over: spent > cat.amount,
            }
        })
        .collect()
}

pub(crate) fn totals(rows: &[SpendRow]) -> Totals {
    rows.iter().fold(Totals::default(), |mut acc, row| {
        acc.budgeted += row.budgeted;
        acc.spent += row.spent;
        if row.over {
            acc.over_count += 1;
        }
        acc
    })
}
