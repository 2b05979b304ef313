use anyhow::Result;
use std::path::Path;

use crate::engine::{self, Submission, Upsert};
use crate::export;
use crate::models::TransactionDraft;
use crate::store::Store;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], store: &Store) -> Result<()> {
    match args[1].as_str() {
        "budget" | "b" => cli_budget(&args[2..], store),
        "add" | "a" => cli_add(&args[2..], store),
        "summary" | "s" => cli_summary(store),
        "transactions" | "t" => cli_transactions(store),
        "export" => cli_export(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetwidget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("BudgetWidget: budgeted vs. actual spending, stored locally");
    println!();
    println!("Usage: budgetwidget [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  budget <category> <amount>    Set the budget for a category");
    println!("  add <category> <amount>       Record a transaction");
    println!("    --date <date>               Transaction date (default: today)");
    println!("    --location <text>           Where it happened");
    println!("    --store <text>              Store or merchant");
    println!("    --id <text>                 Receipt or reference ID");
    println!("  summary                       Print budgeted vs. actual per category");
    println!("  transactions                  List all transactions");
    println!("  export [path]                 Export transactions to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment:");
    println!("  BUDGETWIDGET_DATA_DIR         Data directory override");
    println!("  BUDGETWIDGET_DB               Database file override");
    println!("  BUDGETWIDGET_LOG              Log filter (default: info)");
}

/// Split `args` into positional words and `--flag value` pairs.
fn split_flags<'a>(args: &'a [String], flags: &[&str]) -> (Vec<&'a str>, Vec<(&'a str, &'a str)>) {
    let mut positional = Vec::new();
    let mut values = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(name) = arg.strip_prefix("--").filter(|n| flags.contains(n)) {
            let value = iter.next().map(String::as_str).unwrap_or("");
            values.push((name, value));
        } else {
            positional.push(arg.as_str());
        }
    }
    (positional, values)
}

fn flag<'a>(values: &[(&str, &'a str)], name: &str) -> Option<&'a str> {
    values.iter().rev().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

/// Last word is the amount, everything before it the category name.
fn name_and_amount(words: &[&str]) -> Option<(String, String)> {
    let (amount, name) = words.split_last()?;
    Some((name.join(" "), amount.to_string()))
}

fn cli_budget(args: &[String], store: &Store) -> Result<()> {
    let words: Vec<&str> = args.iter().map(String::as_str).collect();
    let Some((name, amount)) = name_and_amount(&words) else {
        anyhow::bail!("Usage: budgetwidget budget <category> <amount>");
    };

    match engine::set_budget(store, &name, &amount)? {
        Submission::Accepted(outcome) => {
            let verb = match outcome {
                Upsert::Inserted => "Added",
                Upsert::Updated => "Updated",
            };
            println!("{verb} budget: {} = {amount}", crate::models::normalize(name.trim()));
            Ok(())
        }
        Submission::Rejected(reason) => anyhow::bail!("Budget not saved: {reason}"),
    }
}

fn cli_add(args: &[String], store: &Store) -> Result<()> {
    let (words, values) = split_flags(args, &["date", "location", "store", "id"]);
    let Some((category, amount)) = name_and_amount(&words) else {
        anyhow::bail!("Usage: budgetwidget add <category> <amount> [--date D] [--location L] [--store S] [--id I]");
    };

    let draft = TransactionDraft {
        date: flag(&values, "date")
            .map(str::to_string)
            .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string()),
        amount,
        category,
        location: flag(&values, "location").unwrap_or("").to_string(),
        store: flag(&values, "store").unwrap_or("").to_string(),
        id: flag(&values, "id").unwrap_or("").to_string(),
    };

    match engine::record_transaction(store, &draft)? {
        Submission::Accepted(recorded) => {
            let txn = &recorded.transaction;
            println!(
                "Recorded {} in {} on {}",
                format_amount(txn.amount),
                txn.category,
                txn.date
            );
            if recorded.category_created {
                println!("Created category {} with no budget", txn.category);
            }
            Ok(())
        }
        Submission::Rejected(reason) => anyhow::bail!("Transaction not saved: {reason}"),
    }
}

fn cli_summary(store: &Store) -> Result<()> {
    let rows = engine::projection(store)?;
    if rows.is_empty() {
        println!("No budget categories");
        return Ok(());
    }
    let totals = engine::totals(&rows);

    println!(
        "{:<24} {:>14} {:>14} {:>14}",
        "Category", "Budgeted", "Actual", "Remaining"
    );
    println!("{}", "─".repeat(69));
    for row in &rows {
        let marker = if row.over { "  OVER" } else { "" };
        println!(
            "{:<24} {:>14} {:>14} {:>14}{marker}",
            row.name,
            format_amount(row.budgeted),
            format_amount(row.spent),
            format_amount(row.remaining()),
        );
    }
    println!("{}", "─".repeat(69));
    println!(
        "{:<24} {:>14} {:>14} {:>14}",
        "Total",
        format_amount(totals.budgeted),
        format_amount(totals.spent),
        format_amount(totals.budgeted - totals.spent),
    );
    if totals.over_count > 0 {
        println!();
        let noun = if totals.over_count == 1 { "category" } else { "categories" };
        println!("{} {noun} over budget", totals.over_count);
    }
    Ok(())
}

fn cli_transactions(store: &Store) -> Result<()> {
    let transactions = store.transactions()?;
    if transactions.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<12} {:<18} {:>12} {:<20} {:<20} ID",
        "Date", "Category", "Amount", "Store", "Location"
    );
    println!("{}", "─".repeat(90));
    for txn in &transactions {
        println!(
            "{:<12} {:<18} {:>12} {:<20} {:<20} {}",
            txn.date,
            txn.category,
            format_amount(txn.amount),
            txn.store,
            txn.location,
            txn.id,
        );
    }
    Ok(())
}

fn cli_export(args: &[String], store: &Store) -> Result<()> {
    let path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| export::shellexpand(a))
        .unwrap_or_else(export::default_export_path);

    let transactions = store.transactions()?;
    let count = export::export_transactions(&transactions, Path::new(&path))?;
    println!("Exported {count} transactions to {path}");
    Ok(())
}
