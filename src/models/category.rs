use serde::{Deserialize, Serialize};

/// Canonical display form of a category name: first character uppercased,
/// the rest lowercased. Does not trim.
/// e.g. `"STEAK"` → `"Steak"`
pub fn normalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Case-insensitive comparison key for a category name.
pub fn category_key(name: &str) -> String {
    name.to_lowercase()
}

/// A named budget bucket. The comparison key is derived from the name
/// whenever the name changes and is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CategoryRecord", into = "CategoryRecord")]
pub struct Category {
    name: String,
    key: String,
    pub amount: f64,
}

/// On-disk shape: `{"name": ..., "amount": ...}`.
#[derive(Serialize, Deserialize)]
struct CategoryRecord {
    name: String,
    amount: f64,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Self::new(record.name, record.amount)
    }
}

impl From<Category> for CategoryRecord {
    fn from(cat: Category) -> Self {
        Self {
            name: cat.name,
            amount: cat.amount,
        }
    }
}

impl Category {
    /// Builds a category from an already-normalized name.
    pub fn new(name: String, amount: f64) -> Self {
        let key = category_key(&name);
        Self { name, key, amount }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn rename(&mut self, name: String) {
        self.key = category_key(&name);
        self.name = name;
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let key = category_key(name);
        categories.iter().find(|c| c.key() == key)
    }

    pub fn position_by_name(categories: &[Category], name: &str) -> Option<usize> {
        let key = category_key(name);
        categories.iter().position(|c| c.key() == key)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
