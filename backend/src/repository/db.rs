//! Database Connection and Setup
//!
//! Manages SQLite database connection and migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Connection shared by all repositories
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    conn: SharedConnection,
}

impl DbState {
    pub fn connection(&self) -> SharedConnection {
        self.conn.clone()
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::TransportFailure(e.to_string())
    }
}

/// Initialize database with path (`:memory:` for a throwaway database)
pub fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = Connection::open(db_path).map_err(|e| {
        tracing::error!(path = %db_path.display(), error = %e, "failed to open database");
        DomainError::TransportFailure(format!("Failed to open {}: {}", db_path.display(), e))
    })?;

    run_migrations(&conn)?;
    tracing::info!(path = %db_path.display(), "database ready");

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
    })
}

/// Current time in epoch milliseconds
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS templates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            created_at INTEGER,
            updated_at INTEGER
        );
        CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            template_id INTEGER NOT NULL,
            details TEXT NOT NULL,
            response_type INTEGER NOT NULL DEFAULT 0,
            mandatory INTEGER NOT NULL DEFAULT 0,
            order_no INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER,
            updated_at INTEGER
        );
        CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE,
            color TEXT
        );
        CREATE TABLE IF NOT EXISTS template_tags (
            template_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            PRIMARY KEY (template_id, tag_id)
        );",
    )?;

    // Attachment columns came after the first release
    if !column_exists(conn, "entries", "file_name")? {
        conn.execute("ALTER TABLE entries ADD COLUMN file_name TEXT", [])?;
    }

    if !column_exists(conn, "entries", "file_size")? {
        conn.execute("ALTER TABLE entries ADD COLUMN file_size INTEGER", [])?;
    }

    // Ordered listing per template
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_entries_template ON entries(template_id, order_no)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_template_tags_tag ON template_tags(tag_id)",
        [],
    )?;

    Ok(())
}
