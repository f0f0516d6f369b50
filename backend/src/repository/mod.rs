//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod template_repo;
mod entry;
mod tag;

#[cfg(test)]
mod tests;

pub use traits::{Repository, SearchableRepository};
pub use db::{init_db, DbState, SharedConnection};
pub use template_repo::TemplateRepository;
pub use entry::{EntryPositioningOperations, EntryRepository};
pub use tag::{TagRepository, TemplateTagOperations};
