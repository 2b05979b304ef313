use anyhow::Result;
use chrono::Local;

use crate::engine::{self, Rejection, SpendRow, Submission, Totals, Upsert};
use crate::models::{normalize, Transaction};
use crate::store::Store;
use crate::ui::form::{Form, FormKind};
use crate::ui::util::format_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Overview,
    Transactions,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Overview, Self::Transactions]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overview => write!(f, "Overview"),
            Self::Transactions => write!(f, "Transactions"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "FORM"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Overview
    pub(crate) rows: Vec<SpendRow>,
    pub(crate) totals: Totals,
    pub(crate) row_index: usize,
    pub(crate) row_scroll: usize,

    // Transactions
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    pub(crate) form: Option<Form>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Overview,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            rows: Vec::new(),
            totals: Totals::default(),
            row_index: 0,
            row_scroll: 0,

            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,

            form: None,

            visible_rows: 20,
        }
    }

    /// Reload both collections and recompute the projection.
    pub(crate) fn refresh(&mut self, store: &Store) -> Result<()> {
        let categories = store.categories()?;
        self.transactions = store.transactions()?;
        self.rows = engine::aggregate_spend(&categories, &self.transactions);
        self.totals = engine::totals(&self.rows);

        if self.row_index >= self.rows.len() {
            self.row_index = self.rows.len().saturating_sub(1);
        }
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        Ok(())
    }

    pub(crate) fn selected_category(&self) -> Option<&str> {
        if self.screen != Screen::Overview {
            return None;
        }
        self.rows.get(self.row_index).map(|r| r.name.as_str())
    }

    pub(crate) fn open_budget_form(&mut self) {
        let form = Form::budget(self.selected_category());
        self.form = Some(form);
        self.input_mode = InputMode::Form;
    }

    pub(crate) fn open_transaction_form(&mut self) {
        let today = Local::now().format("%Y-%m-%d").to_string();
        let form = Form::transaction(&today, self.selected_category());
        self.form = Some(form);
        self.input_mode = InputMode::Form;
    }

    pub(crate) fn cancel_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
        self.set_status("Cancelled");
    }

    /// Submit the open form. Accepted input closes the form; rejected input
    /// leaves it open with its contents untouched.
    pub(crate) fn submit_form(&mut self, store: &Store) -> Result<()> {
        let Some(form) = self.form.clone() else {
            return Ok(());
        };

        let accepted = match form.kind {
            FormKind::Budget => {
                let (name, amount) = form.budget_input();
                match engine::set_budget(store, name, amount)? {
                    Submission::Accepted(outcome) => {
                        let verb = match outcome {
                            Upsert::Inserted => "Added",
                            Upsert::Updated => "Updated",
                        };
                        self.set_status(format!("{verb} budget: {}", normalize(name.trim())));
                        true
                    }
                    Submission::Rejected(reason) => {
                        self.reject(reason);
                        false
                    }
                }
            }
            FormKind::Transaction => {
                let draft = form.transaction_draft();
                match engine::record_transaction(store, &draft)? {
                    Submission::Accepted(recorded) => {
                        let txn = &recorded.transaction;
                        let mut msg = format!(
                            "Recorded {} in {}",
                            format_amount(txn.amount),
                            txn.category
                        );
                        if recorded.category_created {
                            msg.push_str(" (new category)");
                        }
                        self.set_status(msg);
                        true
                    }
                    Submission::Rejected(reason) => {
                        self.reject(reason);
                        false
                    }
                }
            }
        };

        if accepted {
            self.form = None;
            self.input_mode = InputMode::Normal;
            self.refresh(store)?;
        }
        Ok(())
    }

    fn reject(&mut self, reason: Rejection) {
        self.set_status(format!("Not saved: {reason}"));
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
