//! Commands for Checklist Templates
//!
//! Template CRUD plus loading a template with its ordered entries and tags.

use crate::domain::{ChecklistTemplate, DomainResult, TemplateDetail};
use crate::repository::{Repository, SearchableRepository, TemplateTagOperations};
use crate::AppState;

/// Create a template from a title
pub async fn create_template(state: &AppState, title: &str) -> DomainResult<ChecklistTemplate> {
    let title = ChecklistTemplate::validate_title(title)?;
    let created = state.templates.create(&ChecklistTemplate::new(0, title)).await?;
    tracing::info!(template_id = created.id, "template created");
    Ok(created)
}

/// Load a template with its entries (display order) and tags
pub async fn load_template(state: &AppState, id: u32) -> DomainResult<TemplateDetail> {
    let template = state.templates.require(id).await?;

    let entries = state.entries.list_by_template(id).await?;
    let tags = state.tags.get_tags_for_template(id).await?;

    Ok(TemplateDetail { template, entries, tags })
}

/// List all templates
pub async fn list_templates(state: &AppState) -> DomainResult<Vec<ChecklistTemplate>> {
    state.templates.list().await
}

/// Templates whose title contains the query
pub async fn search_templates(state: &AppState, query: &str) -> DomainResult<Vec<ChecklistTemplate>> {
    state.templates.search(query).await
}

/// Rename a template
pub async fn rename_template(state: &AppState, id: u32, title: &str) -> DomainResult<ChecklistTemplate> {
    let title = ChecklistTemplate::validate_title(title)?;
    let existing = state.templates.require(id).await?;

    state.templates.update(&ChecklistTemplate { title, ..existing }).await
}

/// Delete a template with its entries and tag assignments
pub async fn delete_template(state: &AppState, id: u32) -> DomainResult<()> {
    state.templates.delete(id).await?;
    tracing::info!(template_id = id, "template deleted");
    Ok(())
}
