mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::models::{Category, Transaction};

/// The two named entries held in the key-value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Collection {
    Categories,
    Transactions,
}

impl Collection {
    pub(crate) fn key(&self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Transactions => "transactions",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Why a load fell back to an empty collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DefaultReason {
    Absent,
    Malformed(String),
}

/// Result of reading a collection. Missing or unparsable content is not an
/// error: it loads as `Defaulted` and behaves as an empty collection.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Loaded<T> {
    Found(Vec<T>),
    Defaulted(DefaultReason),
}

impl<T> Loaded<T> {
    pub(crate) fn into_records(self) -> Vec<T> {
        match self {
            Self::Found(records) => records,
            Self::Defaulted(_) => Vec::new(),
        }
    }

    /// True when stored content existed but could not be parsed.
    pub(crate) fn is_unreadable(&self) -> bool {
        matches!(self, Self::Defaulted(DefaultReason::Malformed(_)))
    }
}

pub(crate) struct Store {
    conn: Connection,
}

impl Store {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open store: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set store pragmas")?;
        let mut store = Self { conn };
        store.migrate().context("Store migration failed")?;
        tracing::debug!(path = %path.display(), "store opened");
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = match self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            }) {
            Ok(version) => version,
            Err(rusqlite::Error::QueryReturnedNoRows) => 0,
            Err(e) => return Err(e).context("Failed to read schema version"),
        };

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Raw entries ───────────────────────────────────────────

    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let result = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            });
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read '{key}'")),
        }
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, chrono::Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("Failed to write '{key}'"))?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn put_raw_for_test(&self, collection: Collection, value: &str) -> Result<()> {
        self.put_raw(collection.key(), value)
    }

    // ── Collections ───────────────────────────────────────────

    pub(crate) fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Loaded<T>> {
        let Some(raw) = self.get_raw(collection.key())? else {
            return Ok(Loaded::Defaulted(DefaultReason::Absent));
        };
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => Ok(Loaded::Found(records)),
            Err(e) => {
                tracing::warn!(%collection, error = %e, "stored collection is malformed, treating as empty");
                Ok(Loaded::Defaulted(DefaultReason::Malformed(e.to_string())))
            }
        }
    }

    /// Replace the whole collection. Last write wins.
    pub(crate) fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        let json = serde_json::to_string(records)
            .with_context(|| format!("Failed to serialize {collection}"))?;
        self.put_raw(collection.key(), &json)?;
        tracing::debug!(%collection, count = records.len(), "collection saved");
        Ok(())
    }

    pub(crate) fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.load(Collection::Categories)?.into_records())
    }

    pub(crate) fn transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.load(Collection::Transactions)?.into_records())
    }

    /// Collections whose stored content could not be read and now load as
    /// empty. Absent entries are not reported.
    pub(crate) fn unreadable_collections(&self) -> Result<Vec<Collection>> {
        let mut unreadable = Vec::new();
        let categories: Loaded<Category> = self.load(Collection::Categories)?;
        if categories.is_unreadable() {
            unreadable.push(Collection::Categories);
        }
        let transactions: Loaded<Transaction> = self.load(Collection::Transactions)?;
        if transactions.is_unreadable() {
            unreadable.push(Collection::Transactions);
        }
        Ok(unreadable)
    }

    pub(crate) fn save_categories(&self, categories: &[Category]) -> Result<()> {
        self.save(Collection::Categories, categories)
    }

    pub(crate) fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.save(Collection::Transactions, transactions)
    }
}
