//! Numbered Projection
//!
//! Turns ordered entries into display rows. Items are numbered 1, 2, 3...
//! in order; section breaks carry their label and do not use up a number.

use std::fmt;

use checklist_backend::domain::ChecklistEntry;
use serde::Serialize;

use crate::classify::{classify_entry, DisplayMeta};

/// One rendered line of the editor list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub entry: ChecklistEntry,
    /// Item number, `None` for section breaks
    pub number: Option<usize>,
    pub meta: DisplayMeta,
    pub is_source: bool,
    pub is_target: bool,
}

impl DisplayRow {
    /// Plain-text rendering: `"1. Check oil"` or `"Section Break: Engine Checks"`
    pub fn render(&self) -> String {
        match self.number {
            Some(n) => format!("{}. {}", n, self.entry.details()),
            None => format!("{}: {}", self.meta.label, self.entry.details()),
        }
    }
}

impl fmt::Display for DisplayRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Rows for entries already in display order, with no drag highlighting
pub fn project(entries: &[ChecklistEntry]) -> Vec<DisplayRow> {
    let mut counter = 0;
    entries
        .iter()
        .map(|entry| {
            let number = if entry.is_section_break() {
                None
            } else {
                counter += 1;
                Some(counter)
            };
            DisplayRow {
                entry: entry.clone(),
                number,
                meta: classify_entry(&entry.body),
                is_source: false,
                is_target: false,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use checklist_backend::domain::{EntryBody, ResponseType};

    fn item(id: u32, details: &str) -> ChecklistEntry {
        ChecklistEntry::new(
            id,
            1,
            id as i32,
            EntryBody::Item {
                details: details.to_string(),
                response_type: ResponseType::PassFailNa,
                mandatory: false,
                attachment: None,
            },
        )
    }

    fn section(id: u32, details: &str) -> ChecklistEntry {
        ChecklistEntry::new(id, 1, id as i32, EntryBody::SectionBreak { details: details.to_string() })
    }

    fn rendered(entries: &[ChecklistEntry]) -> Vec<String> {
        project(entries).iter().map(DisplayRow::render).collect()
    }

    #[test]
    fn test_numbering_skips_section_breaks() {
        let entries = vec![
            item(1, "Check oil"),
            section(2, "Engine Checks"),
            item(3, "Coolant level"),
            item(4, "Belts"),
        ];
        assert_eq!(
            rendered(&entries),
            vec!["1. Check oil", "Section Break: Engine Checks", "2. Coolant level", "3. Belts"]
        );
    }

    #[test]
    fn test_numbering_independent_of_order_no() {
        // Gaps left by deletes do not show up in numbering
        let mut entries = vec![item(1, "A"), item(5, "B")];
        entries[1].order_no = 9;
        let rows = project(&entries);
        assert_eq!(rows[1].number, Some(2));
    }

    #[test]
    fn test_leading_and_adjacent_sections() {
        let entries = vec![section(1, "Cab"), section(2, "Mirrors"), item(3, "Left mirror")];
        let rows = project(&entries);
        assert_eq!(rows[0].number, None);
        assert_eq!(rows[1].number, None);
        assert_eq!(rows[2].number, Some(1));
        assert_eq!(rows[2].meta.label, "Pass / Fail / N/A");
        assert_eq!(rows[2].to_string(), "1. Left mirror");
    }

    #[test]
    fn test_row_wire_shape() {
        let rows = project(&[section(1, "Brakes"), item(2, "Pads")]);
        let json = serde_json::to_value(&rows[1]).unwrap();
        assert_eq!(json["number"], 1);
        assert_eq!(json["meta"]["styleClass"], "entry-pass-fail");
        assert_eq!(json["isSource"], false);
        assert_eq!(json["entry"]["entryKind"], "checklistItem");
        assert!(serde_json::to_value(&rows[0]).unwrap()["number"].is_null());
    }

    #[test]
    fn test_empty() {
        assert!(project(&[]).is_empty());
    }
}
