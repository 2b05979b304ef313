use crate::models::TransactionDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormKind {
    Budget,
    Transaction,
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Budget => write!(f, "Set Budget"),
            Self::Transaction => write!(f, "Add Transaction"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FormField {
    pub(crate) label: &'static str,
    pub(crate) value: String,
}

impl FormField {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
        }
    }
}

/// A small multi-field input, one per submission type.
#[derive(Debug, Clone)]
pub(crate) struct Form {
    pub(crate) kind: FormKind,
    pub(crate) fields: Vec<FormField>,
    pub(crate) focused: usize,
}

const BUDGET_NAME: usize = 0;
const BUDGET_AMOUNT: usize = 1;

const TXN_DATE: usize = 0;
const TXN_AMOUNT: usize = 1;
const TXN_CATEGORY: usize = 2;
const TXN_LOCATION: usize = 3;
const TXN_STORE: usize = 4;
const TXN_ID: usize = 5;

impl Form {
    pub(crate) fn budget(category: Option<&str>) -> Self {
        let mut fields = vec![FormField::new("Category"), FormField::new("Budget")];
        let mut focused = BUDGET_NAME;
        if let Some(name) = category {
            fields[BUDGET_NAME].value = name.to_string();
            focused = BUDGET_AMOUNT;
        }
        Self {
            kind: FormKind::Budget,
            fields,
            focused,
        }
    }

    pub(crate) fn transaction(today: &str, category: Option<&str>) -> Self {
        let mut fields = vec![
            FormField::new("Date"),
            FormField::new("Amount"),
            FormField::new("Category"),
            FormField::new("Location"),
            FormField::new("Store"),
            FormField::new("ID"),
        ];
        fields[TXN_DATE].value = today.to_string();
        if let Some(name) = category {
            fields[TXN_CATEGORY].value = name.to_string();
        }
        Self {
            kind: FormKind::Transaction,
            fields,
            focused: TXN_AMOUNT,
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    pub(crate) fn prev_field(&mut self) {
        self.focused = if self.focused == 0 {
            self.fields.len() - 1
        } else {
            self.focused - 1
        };
    }

    pub(crate) fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.push(c);
        }
    }

    pub(crate) fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.pop();
        }
    }

    fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map_or("", |f| f.value.as_str())
    }

    /// (name, amount) of a budget form.
    pub(crate) fn budget_input(&self) -> (&str, &str) {
        (self.value(BUDGET_NAME), self.value(BUDGET_AMOUNT))
    }

    pub(crate) fn transaction_draft(&self) -> TransactionDraft {
        TransactionDraft {
            date: self.value(TXN_DATE).to_string(),
            amount: self.value(TXN_AMOUNT).to_string(),
            category: self.value(TXN_CATEGORY).to_string(),
            location: self.value(TXN_LOCATION).to_string(),
            store: self.value(TXN_STORE).to_string(),
            id: self.value(TXN_ID).to_string(),
        }
    }
}
