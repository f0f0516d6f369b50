//! Commands for Checklist Entries
//!
//! List, create, update, delete and batch-reorder the entries of a template.

use serde::{Deserialize, Serialize};

use crate::domain::{ChecklistEntry, DomainError, DomainResult, EntryDraft, EntryPatch};
use crate::repository::{EntryPositioningOperations, Repository};
use crate::AppState;

// ========================
// Argument Structs
// ========================

/// Body of a create-entry call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub template_id: u32,
    #[serde(flatten)]
    pub draft: EntryDraft,
    /// Omitted: the backend appends after the current last entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_no: Option<i32>,
}

/// Body of an update-entry call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    pub id: u32,
    #[serde(flatten)]
    pub patch: EntryPatch,
}

/// One `{id, orderNo}` pair of a batch reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAssignment {
    pub id: u32,
    pub order_no: i32,
}

/// Body of a batch reorder call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub template_id: u32,
    pub items: Vec<OrderAssignment>,
}

impl ReorderRequest {
    /// Assign `orderNo = index + 1` to ids in the given order
    pub fn sequential(template_id: u32, ids: &[u32]) -> Self {
        Self {
            template_id,
            items: ids
                .iter()
                .enumerate()
                .map(|(i, id)| OrderAssignment { id: *id, order_no: i as i32 + 1 })
                .collect(),
        }
    }
}

// ========================
// Commands
// ========================

/// Entries of a template in display order
pub async fn list_entries(state: &AppState, template_id: u32) -> DomainResult<Vec<ChecklistEntry>> {
    if !state.templates.exists(template_id).await? {
        return Err(DomainError::not_found("Template", template_id));
    }
    state.entries.list_by_template(template_id).await
}

/// Create a new entry
pub async fn create_entry(state: &AppState, request: CreateEntryRequest) -> DomainResult<ChecklistEntry> {
    let body = request.draft.validate()?;
    let order_no = match request.order_no {
        Some(n) if n < 1 => {
            return Err(DomainError::validation(format!("orderNo must be at least 1, got {}", n)))
        }
        Some(n) => n,
        None => 0, // assigned by the repository
    };

    let entry = ChecklistEntry::new(0, request.template_id, order_no, body);
    let created = state.entries.create(&entry).await?;
    tracing::info!(
        template_id = created.template_id,
        entry_id = created.id,
        order_no = created.order_no,
        "entry created"
    );
    Ok(created)
}

/// Update the mutable fields of an entry
pub async fn update_entry(state: &AppState, request: UpdateEntryRequest) -> DomainResult<ChecklistEntry> {
    let existing = state.entries.require(request.id).await?;

    let body = request.patch.apply(&existing.body)?;
    let updated = ChecklistEntry { body, ..existing };

    state.entries.update(&updated).await
}

/// Delete an entry (remaining order numbers keep their gaps)
pub async fn delete_entry(state: &AppState, id: u32) -> DomainResult<()> {
    state.entries.delete(id).await?;
    tracing::info!(entry_id = id, "entry deleted");
    Ok(())
}

/// Apply a complete order assignment atomically
pub async fn reorder_entries(state: &AppState, request: ReorderRequest) -> DomainResult<()> {
    let items: Vec<(u32, i32)> = request.items.iter().map(|a| (a.id, a.order_no)).collect();
    state.entries.reorder_batch(request.template_id, &items).await?;
    tracing::info!(template_id = request.template_id, count = items.len(), "entries reordered");
    Ok(())
}
