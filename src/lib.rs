//! Checklist Editor
//!
//! Editing engine for checklist templates:
//! - ordering: entries of one template in display order, synced to the store
//! - classify / display: type labels and numbered rows
//! - store: drag-and-drop wired to reorder
//! - commands: the backend seam the engine talks through

pub mod commands;
pub mod ordering;
pub mod classify;
pub mod display;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use classify::{classify, classify_entry, DisplayMeta};
pub use commands::ChecklistBackend;
pub use display::{project, DisplayRow};
pub use ordering::OrderingModel;
pub use store::{DropOutcome, EditorStore};
