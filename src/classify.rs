//! Item-Type Classification
//!
//! Maps a response type code to the label and style class an entry is
//! shown with. Total over `i32`: anything unrecognised is "Unknown".

use checklist_backend::domain::{EntryBody, ResponseType, SECTION_BREAK_CODE};
use serde::Serialize;

/// How an entry type is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayMeta {
    pub label: &'static str,
    pub style_class: &'static str,
}

const SECTION_BREAK: DisplayMeta = DisplayMeta { label: "Section Break", style_class: "entry-section-break" };
const UNKNOWN: DisplayMeta = DisplayMeta { label: "Unknown", style_class: "entry-unknown" };

/// Label and style class for a stored type code
pub fn classify(code: i32) -> DisplayMeta {
    if code == SECTION_BREAK_CODE {
        return SECTION_BREAK;
    }
    classify_response(ResponseType::from_code(code))
}

/// Classification for a response type
pub fn classify_response(response_type: ResponseType) -> DisplayMeta {
    let (label, style_class) = match response_type {
        ResponseType::Checkbox => ("Checkbox", "entry-checkbox"),
        ResponseType::PassFailNa => ("Pass / Fail / N/A", "entry-pass-fail"),
        ResponseType::Image => ("Image", "entry-image"),
        ResponseType::Comment => ("Comment", "entry-comment"),
        ResponseType::YesNo => ("Yes / No", "entry-yes-no"),
        ResponseType::PoorFairGood => ("Poor / Fair / Good", "entry-poor-fair-good"),
        ResponseType::Signature => ("Signature", "entry-signature"),
        ResponseType::DateTime => ("Date / Time", "entry-date-time"),
        ResponseType::TextOnly => ("Text Only", "entry-text-only"),
        ResponseType::Unknown(_) => return UNKNOWN,
    };
    DisplayMeta { label, style_class }
}

/// Classification for an entry body.
///
/// Goes by variant rather than code, so an item never shows as a section
/// break even if its stored code is 0.
pub fn classify_entry(body: &EntryBody) -> DisplayMeta {
    match body {
        EntryBody::SectionBreak { .. } => SECTION_BREAK,
        EntryBody::Item { response_type, .. } => classify_response(*response_type),
    }
}

/// Selectable response types with their presentation, in code order
pub fn response_options() -> Vec<(ResponseType, DisplayMeta)> {
    ResponseType::ALL.iter().map(|t| (*t, classify_response(*t))).collect()
}
