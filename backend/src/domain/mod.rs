//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage dependencies (only serde and thiserror).

mod entity;
mod entry;
mod template;
mod tag;

pub use entity::{Entity, DomainError, DomainResult};
pub use entry::{
    sort_entries, Attachment, ChecklistEntry, EntryBody, EntryDraft, EntryKind, EntryPatch,
    EntryRecord, ResponseType, SECTION_BREAK_CODE,
};
pub use template::{ChecklistTemplate, TemplateDetail};
pub use tag::Tag;
