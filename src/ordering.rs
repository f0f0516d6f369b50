//! Ordering Model
//!
//! Holds one template's entries in display order and keeps the backing
//! store in step with every mutation. Reorders are applied locally first
//! and sent as a single batch; a rejected batch puts the authoritative
//! order back.

use std::collections::HashSet;

use checklist_backend::commands::{CreateEntryRequest, ReorderRequest, UpdateEntryRequest};
use checklist_backend::domain::{
    sort_entries, ChecklistEntry, ChecklistTemplate, DomainError, DomainResult, EntryDraft, EntryPatch,
    Tag,
};
use tokio::sync::watch;

use crate::commands::ChecklistBackend;

/// Ordered entries of one template
pub struct OrderingModel<B> {
    backend: B,
    template: ChecklistTemplate,
    tags: Vec<Tag>,
    /// Always sorted by `(order_no, id)`
    entries: Vec<ChecklistEntry>,
    revision: watch::Sender<u64>,
}

impl<B: ChecklistBackend> OrderingModel<B> {
    /// Fetch a template and its entries
    pub async fn load(backend: B, template_id: u32) -> DomainResult<Self> {
        let detail = backend.load_template(template_id).await?;
        let mut entries = detail.entries;
        sort_entries(&mut entries);
        tracing::debug!(template_id, count = entries.len(), "template loaded");

        let (revision, _) = watch::channel(0);
        Ok(Self {
            backend,
            template: detail.template,
            tags: detail.tags,
            entries,
            revision,
        })
    }

    pub fn template(&self) -> &ChecklistTemplate {
        &self.template
    }

    pub fn template_id(&self) -> u32 {
        self.template.id
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Entries ascending by order number, ties broken by id
    pub fn list_ordered(&self) -> &[ChecklistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry ids in display order
    pub fn ids(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn get(&self, id: u32) -> Option<&ChecklistEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Display index of an entry
    pub fn position(&self, id: u32) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Receiver whose value changes after every committed or reverted mutation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Add an entry after the current last one
    pub async fn append(&mut self, draft: EntryDraft) -> DomainResult<ChecklistEntry> {
        draft.validate()?;
        let order_no = self.entries.iter().map(|e| e.order_no).max().unwrap_or(0) + 1;

        let created = self
            .backend
            .create_entry(CreateEntryRequest {
                template_id: self.template.id,
                draft,
                order_no: Some(order_no),
            })
            .await?;

        tracing::info!(template_id = self.template.id, entry_id = created.id, order_no, "entry appended");
        self.entries.push(created.clone());
        sort_entries(&mut self.entries);
        self.bump();
        Ok(created)
    }

    /// Append, then move the new entry to `index` (clamped to the end).
    ///
    /// If the entry cannot be moved into place it is deleted again, so an
    /// error always means nothing was inserted.
    pub async fn insert_at(&mut self, index: usize, draft: EntryDraft) -> DomainResult<ChecklistEntry> {
        let created = self.append(draft).await?;

        let mut ids = self.ids();
        ids.retain(|id| *id != created.id);
        ids.insert(index.min(ids.len()), created.id);

        if let Err(err) = self.reorder(&ids).await {
            self.discard(created.id).await;
            return Err(err);
        }

        Ok(self.get(created.id).cloned().unwrap_or(created))
    }

    /// Delete an entry. The others keep their order numbers.
    pub async fn remove(&mut self, id: u32) -> DomainResult<()> {
        let index = self.position(id).ok_or_else(|| DomainError::not_found("Entry", id))?;

        self.backend.delete_entry(id).await?;

        self.entries.remove(index);
        tracing::info!(template_id = self.template.id, entry_id = id, "entry removed");
        self.bump();
        Ok(())
    }

    /// Change the mutable fields of an entry; its position stays put
    pub async fn update(&mut self, id: u32, patch: EntryPatch) -> DomainResult<ChecklistEntry> {
        let index = self.position(id).ok_or_else(|| DomainError::not_found("Entry", id))?;
        if patch.is_empty() {
            return Ok(self.entries[index].clone());
        }
        patch.apply(&self.entries[index].body)?;

        let updated = self.backend.update_entry(UpdateEntryRequest { id, patch }).await?;

        let order_no = self.entries[index].order_no;
        self.entries[index] = ChecklistEntry { order_no, ..updated.clone() };
        tracing::debug!(entry_id = id, "entry updated");
        self.bump();
        Ok(updated)
    }

    /// Put the entries in the order of `ids` and number them 1..N.
    ///
    /// `ids` must name every current entry exactly once. The new order is
    /// visible immediately; if the batch write fails, the authoritative
    /// order is fetched back (or the previous order kept when that fails
    /// too) and the write error is returned.
    pub async fn reorder(&mut self, ids: &[u32]) -> DomainResult<()> {
        self.check_permutation(ids)?;

        let snapshot = self.entries.clone();
        let mut reordered = Vec::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            if let Some(entry) = snapshot.iter().find(|e| e.id == *id) {
                reordered.push(ChecklistEntry { order_no: index as i32 + 1, ..entry.clone() });
            }
        }
        self.entries = reordered;
        self.bump();

        let request = ReorderRequest::sequential(self.template.id, ids);
        match self.backend.reorder_entries(request).await {
            Ok(()) => {
                tracing::info!(template_id = self.template.id, count = ids.len(), "reorder committed");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(template_id = self.template.id, error = %err, "reorder failed, reverting");
                match self.backend.list_entries(self.template.id).await {
                    Ok(mut entries) => {
                        sort_entries(&mut entries);
                        self.entries = entries;
                    }
                    Err(refetch_err) => {
                        tracing::error!(
                            template_id = self.template.id,
                            error = %refetch_err,
                            "could not re-read entries, keeping previous order"
                        );
                        self.entries = snapshot;
                    }
                }
                self.bump();
                Err(err)
            }
        }
    }

    /// Replace local state with the backing store's entries
    pub async fn refresh(&mut self) -> DomainResult<()> {
        let mut entries = self.backend.list_entries(self.template.id).await?;
        sort_entries(&mut entries);
        self.entries = entries;
        self.bump();
        Ok(())
    }

    /// Best-effort removal of an entry whose insert could not complete
    async fn discard(&mut self, id: u32) {
        match self.backend.delete_entry(id).await {
            Ok(()) => {
                if let Some(index) = self.position(id) {
                    self.entries.remove(index);
                    self.bump();
                }
                tracing::warn!(template_id = self.template.id, entry_id = id, "insert rolled back");
            }
            Err(err) => {
                tracing::error!(entry_id = id, error = %err, "could not roll back insert");
            }
        }
    }

    fn check_permutation(&self, ids: &[u32]) -> DomainResult<()> {
        if ids.len() != self.entries.len() {
            return Err(DomainError::validation(format!(
                "reorder names {} entries, template has {}",
                ids.len(),
                self.entries.len()
            )));
        }
        let mut seen = HashSet::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(*id) {
                return Err(DomainError::validation(format!("entry {} appears twice in reorder", id)));
            }
            if self.get(*id).is_none() {
                return Err(DomainError::validation(format!("entry {} is not in this template", id)));
            }
        }
        Ok(())
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}
