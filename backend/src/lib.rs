//! Checklist Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and SQLite implementations
//! - commands: Command handlers callers use to reach the store

pub mod config;
pub mod domain;
pub mod repository;
pub mod commands;

pub use config::BackendConfig;

use repository::{init_db, DbState, EntryRepository, TagRepository, TemplateRepository};
use domain::DomainResult;

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
    pub templates: TemplateRepository,
    pub entries: EntryRepository,
    pub tags: TagRepository,
}

impl AppState {
    /// Open (and migrate) the database named by the config
    pub fn open(config: &BackendConfig) -> DomainResult<Self> {
        let db_state = init_db(&config.db_path)?;
        Ok(Self::from_db(db_state))
    }

    /// Fresh in-memory store
    pub fn in_memory() -> DomainResult<Self> {
        Self::open(&BackendConfig::in_memory())
    }

    fn from_db(db_state: DbState) -> Self {
        let conn = db_state.connection();
        Self {
            templates: TemplateRepository::new(conn.clone()),
            entries: EntryRepository::new(conn.clone()),
            tags: TagRepository::new(conn),
            db_state,
        }
    }
}
