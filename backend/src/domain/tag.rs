//! Tag Entity
//!
//! Tags are attached to templates for categorization and filtering.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};

/// A tag for categorizing templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier
    pub id: u32,
    /// Tag name
    pub name: String,
    /// Color (hex, e.g., "#FF5733")
    pub color: Option<String>,
}

impl Tag {
    pub fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            color: None,
        }
    }

    pub fn with_color(id: u32, name: String, color: String) -> Self {
        Self {
            id,
            name,
            color: Some(color),
        }
    }

    pub fn validate_name(name: &str) -> DomainResult<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("tag name is required"));
        }
        Ok(trimmed.to_string())
    }
}

impl Entity for Tag {
    const KIND: &'static str = "Tag";
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
