//! Backend Configuration
//!
//! Resolved from the environment; callers may override individual fields.

use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "CHECKLIST_DB_PATH";
pub const LOG_DIR_VAR: &str = "CHECKLIST_LOG_DIR";

/// Where the backend keeps its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// SQLite database file (`:memory:` for a throwaway store)
    pub db_path: PathBuf,
    /// Directory for rolling log files
    pub log_dir: PathBuf,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("checklist.db"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl BackendConfig {
    /// Read `CHECKLIST_DB_PATH` and `CHECKLIST_LOG_DIR`, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            db_path: lookup(DB_PATH_VAR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_dir: lookup(LOG_DIR_VAR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
        }
    }

    /// Config for an in-memory database
    pub fn in_memory() -> Self {
        Self {
            db_path: PathBuf::from(":memory:"),
            ..Self::default()
        }
    }
}
