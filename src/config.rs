use anyhow::{Context, Result};
use std::path::PathBuf;

const DB_FILE: &str = "budgetwidget.db";
const LOG_FILE: &str = "budgetwidget.log";

pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) log_filter: String,
}

impl Config {
    /// Resolve paths from the platform data directory, with
    /// `BUDGETWIDGET_DATA_DIR`, `BUDGETWIDGET_DB` and `BUDGETWIDGET_LOG`
    /// overrides. Creates the data directory.
    pub(crate) fn from_env() -> Result<Self> {
        let data_dir = match std::env::var_os("BUDGETWIDGET_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => directories::ProjectDirs::from("com", "budgetwidget", "BudgetWidget")
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = std::env::var_os("BUDGETWIDGET_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DB_FILE));
        let log_filter = std::env::var("BUDGETWIDGET_LOG").unwrap_or_else(|_| "info".into());

        Ok(Self {
            log_path: data_dir.join(LOG_FILE),
            data_dir,
            db_path,
            log_filter,
        })
    }
}
