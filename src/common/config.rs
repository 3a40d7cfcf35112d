use std::path::PathBuf;

use crate::common::error::AppError;

pub const LEDGER_PATH_VAR: &str = "GNUCASH_FILE_PATH";
pub const LOG_FILE_VAR: &str = "LOG_FILE_PATH";

/// Process configuration for the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// GnuCash file to load, compressed or not.
    pub ledger_path: PathBuf,
    /// Log destination. Logs go to stderr when unset.
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Reads the configuration from the process environment, after loading
    /// an optional `.env` file from the working directory.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let ledger_path = non_empty(LEDGER_PATH_VAR)
            .map(PathBuf::from)
            .ok_or(AppError::MissingConfig(LEDGER_PATH_VAR))?;
        let log_file = non_empty(LOG_FILE_VAR).map(PathBuf::from);

        Ok(Self {
            ledger_path,
            log_file,
        })
    }
}
