//! Tag Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Tag CRUD.

use async_trait::async_trait;
use rusqlite::{params, ErrorCode, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, Tag};
use super::super::db::SharedConnection;
use super::super::traits::Repository;

/// SQLite implementation of Tag repository
pub struct TagRepository {
    pub(super) conn: SharedConnection,
}

impl TagRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Lookup ignoring case, matching the uniqueness rule on names
    pub async fn find_by_name(&self, name: &str) -> DomainResult<Option<Tag>> {
        let conn = self.conn.lock().await;
        let tag = conn
            .query_row(
                "SELECT id, name, color FROM tags WHERE name = ? COLLATE NOCASE",
                params![name.trim()],
                row_to_tag,
            )
            .optional()?;
        Ok(tag)
    }
}

#[async_trait]
impl Repository<Tag> for TagRepository {
    async fn create(&self, entity: &Tag) -> DomainResult<Tag> {
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO tags (name, color) VALUES (?, ?)",
            params![entity.name, entity.color],
        )
        .map_err(|e| unique_name_error(e, &entity.name))?;

        Ok(Tag {
            id: conn.last_insert_rowid() as u32,
            ..entity.clone()
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Tag>> {
        let conn = self.conn.lock().await;
        let tag = conn
            .query_row("SELECT id, name, color FROM tags WHERE id = ?", params![id], row_to_tag)
            .optional()?;
        Ok(tag)
    }

    async fn list(&self) -> DomainResult<Vec<Tag>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT id, name, color FROM tags ORDER BY name COLLATE NOCASE, id")?;
        let tags = stmt
            .query_map([], row_to_tag)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tags)
    }

    async fn update(&self, entity: &Tag) -> DomainResult<Tag> {
        let conn = self.conn.lock().await;

        let changed = conn
            .execute(
                "UPDATE tags SET name = ?, color = ? WHERE id = ?",
                params![entity.name, entity.color, entity.id],
            )
            .map_err(|e| unique_name_error(e, &entity.name))?;
        if changed == 0 {
            return Err(DomainError::not_found("Tag", entity.id));
        }

        Ok(entity.clone())
    }

    /// Delete a tag and its assignments; templates are untouched
    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM template_tags WHERE tag_id = ?", params![id])?;
        let deleted = tx.execute("DELETE FROM tags WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(DomainError::not_found("Tag", id));
        }

        tx.commit()?;
        Ok(())
    }
}

fn unique_name_error(e: rusqlite::Error, name: &str) -> DomainError {
    match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => {
            DomainError::validation(format!("tag '{}' already exists", name))
        }
        _ => e.into(),
    }
}

/// Convert a database row to Tag
pub(super) fn row_to_tag(row: &Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
    })
}
