use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::engine::{self, Submission, Upsert};
use crate::export;
use crate::models::normalize;
use crate::store::Store;
use crate::ui::util::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("o", "Go to Overview", cmd_overview, r);
    register_command!("overview", "Go to Overview", cmd_overview, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!(
        "budget",
        "Set budget (e.g. :budget Groceries 400) or open the form",
        cmd_budget,
        r
    );
    register_command!("b", "Set budget or open the form", cmd_budget, r);
    register_command!("add", "Open the transaction form", cmd_add, r);
    register_command!("a", "Open the transaction form", cmd_add, r);
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/spend.csv)",
        cmd_export,
        r
    );
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_overview(_args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    app.screen = Screen::Overview;
    app.refresh(store)
}

fn cmd_transactions(_args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh(store)
}

fn cmd_budget(args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.open_budget_form();
        return Ok(());
    }

    // Last token is the amount, everything before is the category name
    let Some((name, amount)) = args.rsplit_once(' ') else {
        app.set_status("Usage: :budget <category> <amount>");
        return Ok(());
    };

    match engine::set_budget(store, name, amount)? {
        Submission::Accepted(outcome) => {
            app.refresh(store)?;
            app.screen = Screen::Overview;
            let verb = match outcome {
                Upsert::Inserted => "Added",
                Upsert::Updated => "Updated",
            };
            let shown = engine::parse_amount(amount)
                .map(format_amount)
                .unwrap_or_else(|| amount.trim().to_string());
            app.set_status(format!("{verb} budget: {} = {shown}", normalize(name.trim())));
        }
        Submission::Rejected(reason) => {
            app.set_status(format!("Not saved: {reason}"));
        }
    }
    Ok(())
}

fn cmd_add(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.open_transaction_form();
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        export::default_export_path()
    } else {
        export::shellexpand(args)
    };

    let transactions = store.transactions()?;
    match export::export_transactions(&transactions, Path::new(&path)) {
        Ok(0) => app.set_status(format!("No transactions to export (wrote header to {path})")),
        Ok(count) => app.set_status(format!("Exported {count} transactions to {path}")),
        Err(e) => {
            tracing::warn!(path = %path, error = %format!("{e:#}"), "export failed");
            app.set_status(format!("Export failed: {e:#}"));
        }
    }
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::ui::app::InputMode;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("budget", "budget"), 0);
        assert_eq!(levenshtein("budgte", "budget"), 2);
        assert_eq!(levenshtein("", "add"), 3);
    }

    #[test]
    fn test_unknown_command_suggests() {
        let store = Store::open_in_memory().unwrap();
        let mut app = App::new();
        handle_command("budgt Food 10", &mut app, &store).unwrap();
        assert!(app.status_message.contains("Did you mean :budget?"));
    }

    #[test]
    fn test_budget_command_with_multi_word_name() {
        let store = Store::open_in_memory().unwrap();
        let mut app = App::new();
        handle_command("budget eating OUT 120.5", &mut app, &store).unwrap();
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].name, "Eating out");
        assert_eq!(app.rows[0].budgeted, 120.5);
        assert_eq!(app.status_message, "Added budget: Eating out = $120.50");
    }

    #[test]
    fn test_budget_command_update_reports_stored_name() {
        let store = Store::open_in_memory().unwrap();
        let mut app = App::new();
        handle_command("budget rent 900", &mut app, &store).unwrap();
        handle_command("budget RENT 1,250", &mut app, &store).unwrap();
        assert_eq!(app.status_message, "Updated budget: Rent = $1,250.00");
    }

    #[test]
    fn test_budget_command_rejects_bad_amount() {
        let store = Store::open_in_memory().unwrap();
        let mut app = App::new();
        handle_command("budget Food lots", &mut app, &store).unwrap();
        assert!(app.status_message.starts_with("Not saved"));
        assert!(store.categories().unwrap().is_empty());
    }

    #[test]
    fn test_budget_without_args_opens_form() {
        let store = Store::open_in_memory().unwrap();
        let mut app = App::new();
        handle_command("b", &mut app, &store).unwrap();
        assert_eq!(app.input_mode, InputMode::Form);
        assert!(app.form.is_some());
    }

    #[test]
    fn test_quit() {
        let store = Store::open_in_memory().unwrap();
        let mut app = App::new();
        handle_command("q", &mut app, &store).unwrap();
        assert!(!app.running);
    }

    #[test]
    fn test_export_command() {
        let store = Store::open_in_memory().unwrap();
        engine::set_budget(&store, "Food", "10").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spend.csv");
        let mut app = App::new();
        handle_command(&format!("export {}", path.display()), &mut app, &store).unwrap();
        assert!(path.exists());
        assert!(app.status_message.starts_with("No transactions to export"));
    }

    #[test]
    fn test_export_to_missing_directory_keeps_running() {
        let store = Store::open_in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("x.csv");
        let mut app = App::new();
        let result = handle_command(&format!("export {}", path.display()), &mut app, &store);
        assert!(result.is_ok());
        assert!(app.running);
        assert!(app.status_message.starts_with("Export failed"));
        assert!(!path.exists());
    }
}
