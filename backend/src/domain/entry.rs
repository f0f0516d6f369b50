//! Checklist Entry Entity
//!
//! An entry is either a response item technicians fill in, or a section
//! break that only divides the list. Both share one ordered collection per
//! template.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};

/// Response type code reserved for section breaks in storage
pub const SECTION_BREAK_CODE: i32 = 0;

/// How a technician answers a checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ResponseType {
    Checkbox,
    PassFailNa,
    Image,
    Comment,
    YesNo,
    PoorFairGood,
    Signature,
    DateTime,
    TextOnly,
    /// A stored code outside the known set. Only ever produced on read.
    Unknown(i32),
}

impl ResponseType {
    /// Every selectable response type, in code order
    pub const ALL: [ResponseType; 9] = [
        ResponseType::Checkbox,
        ResponseType::PassFailNa,
        ResponseType::Image,
        ResponseType::Comment,
        ResponseType::YesNo,
        ResponseType::PoorFairGood,
        ResponseType::Signature,
        ResponseType::DateTime,
        ResponseType::TextOnly,
    ];

    pub fn code(&self) -> i32 {
        match self {
            ResponseType::Checkbox => 1,
            ResponseType::PassFailNa => 2,
            ResponseType::Image => 3,
            ResponseType::Comment => 4,
            ResponseType::YesNo => 5,
            ResponseType::PoorFairGood => 6,
            ResponseType::Signature => 7,
            ResponseType::DateTime => 8,
            ResponseType::TextOnly => 9,
            ResponseType::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: i32) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .unwrap_or(ResponseType::Unknown(code))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ResponseType::Unknown(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Checkbox => "checkbox",
            ResponseType::PassFailNa => "pass-fail",
            ResponseType::Image => "image",
            ResponseType::Comment => "comment",
            ResponseType::YesNo => "yes-no",
            ResponseType::PoorFairGood => "poor-fair-good",
            ResponseType::Signature => "signature",
            ResponseType::DateTime => "date-time",
            ResponseType::TextOnly => "text-only",
            ResponseType::Unknown(_) => "unknown",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

impl From<i32> for ResponseType {
    fn from(code: i32) -> Self {
        ResponseType::from_code(code)
    }
}

impl From<ResponseType> for i32 {
    fn from(t: ResponseType) -> Self {
        t.code()
    }
}

/// Discriminator carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    SectionBreak,
    ChecklistItem,
}

/// File reference attached to an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub file_size: i64,
}

/// Kind-specific content of an entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryBody {
    SectionBreak {
        details: String,
    },
    Item {
        details: String,
        response_type: ResponseType,
        mandatory: bool,
        attachment: Option<Attachment>,
    },
}

impl EntryBody {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryBody::SectionBreak { .. } => EntryKind::SectionBreak,
            EntryBody::Item { .. } => EntryKind::ChecklistItem,
        }
    }

    pub fn details(&self) -> &str {
        match self {
            EntryBody::SectionBreak { details } | EntryBody::Item { details, .. } => details,
        }
    }

    /// Classification code: 0 for section breaks, the response code otherwise
    pub fn type_code(&self) -> i32 {
        match self {
            EntryBody::SectionBreak { .. } => SECTION_BREAK_CODE,
            EntryBody::Item { response_type, .. } => response_type.code(),
        }
    }

    pub fn is_section_break(&self) -> bool {
        matches!(self, EntryBody::SectionBreak { .. })
    }
}

/// A single entry of a checklist template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EntryRecord", try_from = "EntryRecord")]
pub struct ChecklistEntry {
    /// Unique identifier, stable across reorders
    pub id: u32,
    /// Owning template
    pub template_id: u32,
    /// Display position; dense 1..N right after a reorder
    pub order_no: i32,
    pub body: EntryBody,
}

impl ChecklistEntry {
    pub fn new(id: u32, template_id: u32, order_no: i32, body: EntryBody) -> Self {
        Self { id, template_id, order_no, body }
    }

    pub fn details(&self) -> &str {
        self.body.details()
    }

    pub fn is_section_break(&self) -> bool {
        self.body.is_section_break()
    }

    /// Sort key: order number, ties broken by id
    pub fn order_key(&self) -> (i32, u32) {
        (self.order_no, self.id)
    }
}

impl Entity for ChecklistEntry {
    const KIND: &'static str = "Entry";
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Sort entries into display order
pub fn sort_entries(entries: &mut [ChecklistEntry]) {
    entries.sort_by_key(ChecklistEntry::order_key);
}

/// Flat wire shape of an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    pub id: u32,
    pub template_id: u32,
    pub details: String,
    pub entry_kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandatory: Option<bool>,
    pub order_no: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl From<ChecklistEntry> for EntryRecord {
    fn from(entry: ChecklistEntry) -> Self {
        let (details, entry_kind, response_type, mandatory, attachment) = match entry.body {
            EntryBody::SectionBreak { details } => (details, EntryKind::SectionBreak, None, None, None),
            EntryBody::Item { details, response_type, mandatory, attachment } => (
                details,
                EntryKind::ChecklistItem,
                Some(response_type.code()),
                Some(mandatory),
                attachment,
            ),
        };
        EntryRecord {
            id: entry.id,
            template_id: entry.template_id,
            details,
            entry_kind,
            response_type,
            mandatory,
            order_no: entry.order_no,
            attachment,
        }
    }
}

impl TryFrom<EntryRecord> for ChecklistEntry {
    type Error = DomainError;

    /// Reads tolerate unknown response codes; they surface as `ResponseType::Unknown`.
    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let body = match record.entry_kind {
            EntryKind::SectionBreak => EntryBody::SectionBreak { details: record.details },
            EntryKind::ChecklistItem => {
                let code = record.response_type.ok_or_else(|| {
                    DomainError::validation("responseType is required for checklist items")
                })?;
                EntryBody::Item {
                    details: record.details,
                    response_type: ResponseType::from_code(code),
                    mandatory: record.mandatory.unwrap_or(false),
                    attachment: record.attachment,
                }
            }
        };
        Ok(ChecklistEntry::new(record.id, record.template_id, record.order_no, body))
    }
}

/// An entry that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub details: String,
    pub entry_kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<i32>,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl EntryDraft {
    pub fn section(details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
            entry_kind: EntryKind::SectionBreak,
            response_type: None,
            mandatory: false,
            attachment: None,
        }
    }

    pub fn item(details: impl Into<String>, response_type: ResponseType) -> Self {
        Self {
            details: details.into(),
            entry_kind: EntryKind::ChecklistItem,
            response_type: Some(response_type.code()),
            mandatory: false,
            attachment: None,
        }
    }

    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Check required fields and build the typed body
    pub fn validate(&self) -> DomainResult<EntryBody> {
        let details = required_details(&self.details)?;
        match self.entry_kind {
            EntryKind::SectionBreak => {
                if self.response_type.is_some() || self.mandatory || self.attachment.is_some() {
                    return Err(DomainError::validation(
                        "section breaks carry no response type, mandatory flag or file",
                    ));
                }
                Ok(EntryBody::SectionBreak { details })
            }
            EntryKind::ChecklistItem => {
                let code = self.response_type.ok_or_else(|| {
                    DomainError::validation("responseType is required for checklist items")
                })?;
                Ok(EntryBody::Item {
                    details,
                    response_type: known_response_type(code)?,
                    mandatory: self.mandatory,
                    attachment: self.attachment.clone(),
                })
            }
        }
    }
}

/// Changes to the mutable fields of an entry. `orderNo` is not among them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandatory: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub clear_attachment: bool,
}

impl EntryPatch {
    pub fn details(details: impl Into<String>) -> Self {
        Self { details: Some(details.into()), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self == &EntryPatch::default()
    }

    /// Produce the patched body, or fail without touching anything
    pub fn apply(&self, body: &EntryBody) -> DomainResult<EntryBody> {
        let details = match &self.details {
            Some(d) => required_details(d)?,
            None => body.details().to_string(),
        };

        match body {
            EntryBody::SectionBreak { .. } => {
                if self.response_type.is_some()
                    || self.mandatory.is_some()
                    || self.attachment.is_some()
                    || self.clear_attachment
                {
                    return Err(DomainError::validation(
                        "section breaks carry no response type, mandatory flag or file",
                    ));
                }
                Ok(EntryBody::SectionBreak { details })
            }
            EntryBody::Item { response_type, mandatory, attachment, .. } => {
                let response_type = match self.response_type {
                    Some(code) => known_response_type(code)?,
                    None => *response_type,
                };
                let attachment = if self.clear_attachment {
                    None
                } else {
                    self.attachment.clone().or_else(|| attachment.clone())
                };
                Ok(EntryBody::Item {
                    details,
                    response_type,
                    mandatory: self.mandatory.unwrap_or(*mandatory),
                    attachment,
                })
            }
        }
    }
}

fn required_details(details: &str) -> DomainResult<String> {
    let trimmed = details.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("details is required"));
    }
    Ok(trimmed.to_string())
}

fn known_response_type(code: i32) -> DomainResult<ResponseType> {
    let response_type = ResponseType::from_code(code);
    if !response_type.is_known() {
        return Err(DomainError::validation(format!("unknown responseType {}", code)));
    }
    Ok(response_type)
}
