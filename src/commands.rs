//! Backend Command Bindings
//!
//! The seam between the editor and whatever stores its templates. The
//! editor only ever talks to a [`ChecklistBackend`]; the in-process SQLite
//! backend implements it directly.

use std::sync::Arc;

use async_trait::async_trait;
use checklist_backend::commands::{self, CreateEntryRequest, ReorderRequest, UpdateEntryRequest};
use checklist_backend::domain::{ChecklistEntry, DomainResult, TemplateDetail};
use checklist_backend::AppState;

/// Operations the editor consumes from its backing store
#[async_trait]
pub trait ChecklistBackend: Send + Sync {
    /// Template with its ordered entries and tags
    async fn load_template(&self, template_id: u32) -> DomainResult<TemplateDetail>;

    /// Authoritative entries in display order
    async fn list_entries(&self, template_id: u32) -> DomainResult<Vec<ChecklistEntry>>;

    async fn create_entry(&self, request: CreateEntryRequest) -> DomainResult<ChecklistEntry>;

    async fn update_entry(&self, request: UpdateEntryRequest) -> DomainResult<ChecklistEntry>;

    async fn delete_entry(&self, id: u32) -> DomainResult<()>;

    /// One batch write carrying the full `{id, orderNo}` list; all-or-nothing
    async fn reorder_entries(&self, request: ReorderRequest) -> DomainResult<()>;
}

#[async_trait]
impl ChecklistBackend for AppState {
    async fn load_template(&self, template_id: u32) -> DomainResult<TemplateDetail> {
        commands::load_template(self, template_id).await
    }

    async fn list_entries(&self, template_id: u32) -> DomainResult<Vec<ChecklistEntry>> {
        commands::list_entries(self, template_id).await
    }

    async fn create_entry(&self, request: CreateEntryRequest) -> DomainResult<ChecklistEntry> {
        commands::create_entry(self, request).await
    }

    async fn update_entry(&self, request: UpdateEntryRequest) -> DomainResult<ChecklistEntry> {
        commands::update_entry(self, request).await
    }

    async fn delete_entry(&self, id: u32) -> DomainResult<()> {
        commands::delete_entry(self, id).await
    }

    async fn reorder_entries(&self, request: ReorderRequest) -> DomainResult<()> {
        commands::reorder_entries(self, request).await
    }
}

#[async_trait]
impl<B: ChecklistBackend + ?Sized> ChecklistBackend for Arc<B> {
    async fn load_template(&self, template_id: u32) -> DomainResult<TemplateDetail> {
        (**self).load_template(template_id).await
    }

    async fn list_entries(&self, template_id: u32) -> DomainResult<Vec<ChecklistEntry>> {
        (**self).list_entries(template_id).await
    }

    async fn create_entry(&self, request: CreateEntryRequest) -> DomainResult<ChecklistEntry> {
        (**self).create_entry(request).await
    }

    async fn update_entry(&self, request: UpdateEntryRequest) -> DomainResult<ChecklistEntry> {
        (**self).update_entry(request).await
    }

    async fn delete_entry(&self, id: u32) -> DomainResult<()> {
        (**self).delete_entry(id).await
    }

    async fn reorder_entries(&self, request: ReorderRequest) -> DomainResult<()> {
        (**self).reorder_entries(request).await
    }
}
