//! Tag Repository Module
//!
//! This module provides tag repository functionality split into specialized sub-modules:
//! - tag_repo: Core CRUD operations
//! - template_tag: Template-Tag relationship operations

mod tag_repo;
mod template_tag;

pub use tag_repo::TagRepository;

// Re-export the operation trait so it can be used by importing TagRepository
pub use template_tag::TemplateTagOperations;
