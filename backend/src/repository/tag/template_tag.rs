//! Template-Tag Relationship Operations
//!
//! Operations for managing the many-to-many relationship between templates and tags.
//! Join rows are owned by neither side; removing one never touches the template or the tag.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::domain::{DomainError, DomainResult, Tag};
use super::super::template_repo::template_exists;

/// Trait for template-tag relationship operations
#[async_trait]
pub trait TemplateTagOperations {
    /// Add a tag to a template (no-op if already assigned)
    async fn add_tag_to_template(&self, template_id: u32, tag_id: u32) -> DomainResult<()>;

    /// Remove a tag from a template
    async fn remove_tag_from_template(&self, template_id: u32, tag_id: u32) -> DomainResult<()>;

    /// Get all tags for a template (sorted by name, case-insensitive)
    async fn get_tags_for_template(&self, template_id: u32) -> DomainResult<Vec<Tag>>;

    /// Get ids of all templates with a specific tag
    async fn get_templates_with_tag(&self, tag_id: u32) -> DomainResult<Vec<u32>>;
}

#[async_trait]
impl TemplateTagOperations for super::tag_repo::TagRepository {
    async fn add_tag_to_template(&self, template_id: u32, tag_id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        if !template_exists(&conn, template_id)? {
            return Err(DomainError::not_found("Template", template_id));
        }
        let tag_found = conn
            .query_row("SELECT 1 FROM tags WHERE id = ?", params![tag_id], |_| Ok(()))
            .optional()?;
        if tag_found.is_none() {
            return Err(DomainError::not_found("Tag", tag_id));
        }

        conn.execute(
            "INSERT OR IGNORE INTO template_tags (template_id, tag_id) VALUES (?, ?)",
            params![template_id, tag_id],
        )?;

        Ok(())
    }

    async fn remove_tag_from_template(&self, template_id: u32, tag_id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        conn.execute(
            "DELETE FROM template_tags WHERE template_id = ? AND tag_id = ?",
            params![template_id, tag_id],
        )?;

        Ok(())
    }

    async fn get_tags_for_template(&self, template_id: u32) -> DomainResult<Vec<Tag>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(
            "SELECT t.id, t.name, t.color FROM tags t
             JOIN template_tags tt ON t.id = tt.tag_id
             WHERE tt.template_id = ?",
        )?;
        let mut tags = stmt
            .query_map(params![template_id], super::tag_repo::row_to_tag)?
            .collect::<Result<Vec<_>, _>>()?;

        tags.sort_by_cached_key(|t| (t.name.to_lowercase(), t.id));
        Ok(tags)
    }

    async fn get_templates_with_tag(&self, tag_id: u32) -> DomainResult<Vec<u32>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare("SELECT template_id FROM template_tags WHERE tag_id = ? ORDER BY template_id")?;
        let template_ids = stmt
            .query_map(params![tag_id], |row| row.get::<_, u32>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(template_ids)
    }
}
