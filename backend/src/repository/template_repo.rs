//! Template Repository Implementation
//!
//! SQLite-backed implementation for template CRUD. Deleting a template
//! cascades to its entries and tag assignments.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{ChecklistTemplate, DomainError, DomainResult};
use super::db::{now_millis, SharedConnection};
use super::traits::{Repository, SearchableRepository};

/// SQLite implementation of Template repository
pub struct TemplateRepository {
    conn: SharedConnection,
}

impl TemplateRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn exists(&self, id: u32) -> DomainResult<bool> {
        let conn = self.conn.lock().await;
        template_exists(&conn, id)
    }
}

#[async_trait]
impl Repository<ChecklistTemplate> for TemplateRepository {
    async fn create(&self, entity: &ChecklistTemplate) -> DomainResult<ChecklistTemplate> {
        let conn = self.conn.lock().await;
        let now = now_millis();

        conn.execute(
            "INSERT INTO templates (title, created_at, updated_at) VALUES (?, ?, ?)",
            params![entity.title, now, now],
        )?;

        Ok(ChecklistTemplate {
            id: conn.last_insert_rowid() as u32,
            title: entity.title.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<ChecklistTemplate>> {
        let conn = self.conn.lock().await;
        let template = conn
            .query_row(
                "SELECT id, title, created_at, updated_at FROM templates WHERE id = ?",
                params![id],
                row_to_template,
            )
            .optional()?;
        Ok(template)
    }

    async fn list(&self) -> DomainResult<Vec<ChecklistTemplate>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT id, title, created_at, updated_at FROM templates ORDER BY id")?;
        let templates = stmt
            .query_map([], row_to_template)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(templates)
    }

    async fn update(&self, entity: &ChecklistTemplate) -> DomainResult<ChecklistTemplate> {
        let conn = self.conn.lock().await;
        let now = now_millis();

        let changed = conn.execute(
            "UPDATE templates SET title = ?, updated_at = ? WHERE id = ?",
            params![entity.title, now, entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::not_found("Template", entity.id));
        }

        Ok(ChecklistTemplate {
            updated_at: Some(now),
            ..entity.clone()
        })
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        // Manual cascade: entries and tag assignments go with the template
        let entries = tx.execute("DELETE FROM entries WHERE template_id = ?", params![id])?;
        tx.execute("DELETE FROM template_tags WHERE template_id = ?", params![id])?;
        let deleted = tx.execute("DELETE FROM templates WHERE id = ?", params![id])?;
        if deleted == 0 {
            // dropping the transaction rolls back
            return Err(DomainError::not_found("Template", id));
        }

        tx.commit()?;
        tracing::debug!(template_id = id, entries, "template deleted");
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<ChecklistTemplate> for TemplateRepository {
    async fn search(&self, query: &str) -> DomainResult<Vec<ChecklistTemplate>> {
        let conn = self.conn.lock().await;
        let pattern = format!("%{}%", query.trim());
        let mut stmt = conn.prepare(
            "SELECT id, title, created_at, updated_at FROM templates WHERE title LIKE ? ORDER BY title COLLATE NOCASE, id",
        )?;
        let templates = stmt
            .query_map(params![pattern], row_to_template)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(templates)
    }
}

/// Whether a template row exists
pub(super) fn template_exists(conn: &Connection, id: u32) -> DomainResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM templates WHERE id = ?", params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

/// Convert a database row to ChecklistTemplate
fn row_to_template(row: &Row) -> rusqlite::Result<ChecklistTemplate> {
    Ok(ChecklistTemplate {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}
