//! Recording backend for editor tests
//!
//! Wraps a real in-memory store, counts writes, records reorder batches and
//! can be told to fail reorders or reads.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use checklist_backend::commands::{self, CreateEntryRequest, ReorderRequest, UpdateEntryRequest};
use checklist_backend::domain::{
    ChecklistEntry, DomainError, DomainResult, EntryDraft, ResponseType, TemplateDetail,
};
use checklist_backend::AppState;

use crate::commands::ChecklistBackend;

pub struct RecordingBackend {
    inner: AppState,
    writes: AtomicUsize,
    reorders: Mutex<Vec<ReorderRequest>>,
    fail_reorders: AtomicBool,
    fail_reads: AtomicBool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            inner: AppState::in_memory().unwrap(),
            writes: AtomicUsize::new(0),
            reorders: Mutex::new(Vec::new()),
            fail_reorders: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.inner
    }

    /// Create a template holding checkbox items, bypassing the counters
    pub async fn seed(&self, title: &str, names: &[&str]) -> u32 {
        let template = commands::create_template(&self.inner, title).await.unwrap();
        for name in names {
            self.seed_entry(template.id, name).await;
        }
        template.id
    }

    pub async fn seed_entry(&self, template_id: u32, name: &str) -> ChecklistEntry {
        let request = CreateEntryRequest {
            template_id,
            draft: EntryDraft::item(name, ResponseType::Checkbox),
            order_no: None,
        };
        commands::create_entry(&self.inner, request).await.unwrap()
    }

    /// Writes that went through the trait, failed ones included
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn reorder_calls(&self) -> Vec<ReorderRequest> {
        self.reorders.lock().unwrap().clone()
    }

    pub fn fail_reorders(&self, fail: bool) {
        self.fail_reorders.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_read(&self) -> DomainResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::TransportFailure("store unreachable".to_string()));
        }
        Ok(())
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChecklistBackend for RecordingBackend {
    async fn load_template(&self, template_id: u32) -> DomainResult<TemplateDetail> {
        self.check_read()?;
        self.inner.load_template(template_id).await
    }

    async fn list_entries(&self, template_id: u32) -> DomainResult<Vec<ChecklistEntry>> {
        self.check_read()?;
        self.inner.list_entries(template_id).await
    }

    async fn create_entry(&self, request: CreateEntryRequest) -> DomainResult<ChecklistEntry> {
        self.record_write();
        self.inner.create_entry(request).await
    }

    async fn update_entry(&self, request: UpdateEntryRequest) -> DomainResult<ChecklistEntry> {
        self.record_write();
        self.inner.update_entry(request).await
    }

    async fn delete_entry(&self, id: u32) -> DomainResult<()> {
        self.record_write();
        self.inner.delete_entry(id).await
    }

    async fn reorder_entries(&self, request: ReorderRequest) -> DomainResult<()> {
        self.record_write();
        self.reorders.lock().unwrap().push(request.clone());
        if self.fail_reorders.load(Ordering::SeqCst) {
            return Err(DomainError::TransportFailure("connection reset".to_string()));
        }
        self.inner.reorder_entries(request).await
    }
}
