//! Checklist Template Entity
//!
//! A template is a titled, ordered list of entries with a set of tags.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};
use super::entry::ChecklistEntry;
use super::tag::Tag;

/// Template header row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistTemplate {
    /// Unique identifier
    pub id: u32,
    /// Display title
    pub title: String,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl ChecklistTemplate {
    /// Create a template from its title alone
    pub fn new(id: u32, title: String) -> Self {
        Self {
            id,
            title,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn validate_title(title: &str) -> DomainResult<String> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("title is required"));
        }
        Ok(trimmed.to_string())
    }
}

impl Entity for ChecklistTemplate {
    const KIND: &'static str = "Template";
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// A template together with its ordered entries and assigned tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDetail {
    pub template: ChecklistTemplate,
    pub entries: Vec<ChecklistEntry>,
    pub tags: Vec<Tag>,
}
