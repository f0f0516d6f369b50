//! Commands for Tag operations
//!
//! Exposes Tag CRUD and template-tag relationships.

use crate::domain::{DomainResult, Tag};
use crate::repository::{Repository, TemplateTagOperations};
use crate::AppState;

/// Create a new tag
pub async fn create_tag(state: &AppState, name: &str, color: Option<String>) -> DomainResult<Tag> {
    let name = Tag::validate_name(name)?;

    let tag = if let Some(c) = color {
        Tag::with_color(0, name, c)
    } else {
        Tag::new(0, name)
    };

    state.tags.create(&tag).await
}

/// List all tags
pub async fn list_tags(state: &AppState) -> DomainResult<Vec<Tag>> {
    state.tags.list().await
}

/// Get tag by ID
pub async fn get_tag(state: &AppState, id: u32) -> DomainResult<Option<Tag>> {
    state.tags.find_by_id(id).await
}

/// Find a tag by name, creating it when missing
pub async fn ensure_tag(state: &AppState, name: &str) -> DomainResult<Tag> {
    let name = Tag::validate_name(name)?;
    match state.tags.find_by_name(&name).await? {
        Some(tag) => Ok(tag),
        None => state.tags.create(&Tag::new(0, name)).await,
    }
}

/// Update tag. `color`: `None` keeps it, `Some(None)` clears it.
pub async fn update_tag(
    state: &AppState,
    id: u32,
    name: Option<&str>,
    color: Option<Option<String>>,
) -> DomainResult<Tag> {
    let existing = state.tags.require(id).await?;

    let updated = Tag {
        id: existing.id,
        name: match name {
            Some(n) => Tag::validate_name(n)?,
            None => existing.name,
        },
        color: color.unwrap_or(existing.color),
    };

    state.tags.update(&updated).await
}

/// Delete tag (its template assignments go with it)
pub async fn delete_tag(state: &AppState, id: u32) -> DomainResult<()> {
    state.tags.delete(id).await
}

// ========================
// Template-Tag Relationships
// ========================

/// Add a tag to a template
pub async fn assign_tag(state: &AppState, template_id: u32, tag_id: u32) -> DomainResult<()> {
    state.tags.add_tag_to_template(template_id, tag_id).await
}

/// Remove a tag from a template
pub async fn unassign_tag(state: &AppState, template_id: u32, tag_id: u32) -> DomainResult<()> {
    state.tags.remove_tag_from_template(template_id, tag_id).await
}

/// Get all tags for a template
pub async fn get_template_tags(state: &AppState, template_id: u32) -> DomainResult<Vec<Tag>> {
    state.tags.get_tags_for_template(template_id).await
}

/// Get ids of templates carrying a tag
pub async fn get_templates_with_tag(state: &AppState, tag_id: u32) -> DomainResult<Vec<u32>> {
    state.tags.get_templates_with_tag(tag_id).await
}
