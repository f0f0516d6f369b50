//! Entry Repository Module
//!
//! This module provides entry repository functionality split into specialized sub-modules:
//! - entry_repo: Core CRUD operations and per-template listing
//! - entry_positioning: Order number management (append position, batch reorder)

mod entry_repo;
mod entry_positioning;

pub use entry_repo::EntryRepository;

// Re-export the operation trait so it can be used by importing EntryRepository
pub use entry_positioning::EntryPositioningOperations;
