//! Entry Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for checklist entry CRUD.
//! Order number management lives in entry_positioning.
//!
//! Section breaks are stored with response code 0 and surface as
//! `EntryBody::SectionBreak`; nothing above this module sees the code.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{
    Attachment, ChecklistEntry, DomainError, DomainResult, EntryBody, ResponseType, SECTION_BREAK_CODE,
};
use super::super::db::{now_millis, SharedConnection};
use super::super::template_repo::template_exists;
use super::super::traits::Repository;
use super::entry_positioning::next_order_no_in;

const ENTRY_COLUMNS: &str =
    "id, template_id, details, response_type, mandatory, order_no, file_name, file_size";

/// SQLite implementation of Entry repository
pub struct EntryRepository {
    pub(super) conn: SharedConnection,
}

impl EntryRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Entries of one template, ascending by order number then id
    pub async fn list_by_template(&self, template_id: u32) -> DomainResult<Vec<ChecklistEntry>> {
        let conn = self.conn.lock().await;
        list_by_template_in(&conn, template_id)
    }
}

#[async_trait]
impl Repository<ChecklistEntry> for EntryRepository {
    /// Insert an entry; an order number below 1 means "append at the end"
    async fn create(&self, entity: &ChecklistEntry) -> DomainResult<ChecklistEntry> {
        let conn = self.conn.lock().await;

        if !template_exists(&conn, entity.template_id)? {
            return Err(DomainError::not_found("Template", entity.template_id));
        }

        // Calculate order number in same connection
        let order_no = if entity.order_no < 1 {
            next_order_no_in(&conn, entity.template_id)?
        } else {
            entity.order_no
        };

        let (code, mandatory, file_name, file_size) = body_columns(&entity.body);
        let now = now_millis();
        conn.execute(
            "INSERT INTO entries (template_id, details, response_type, mandatory, order_no, file_name, file_size, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.template_id,
                entity.body.details(),
                code,
                mandatory,
                order_no,
                file_name,
                file_size,
                now,
                now
            ],
        )?;

        Ok(ChecklistEntry {
            id: conn.last_insert_rowid() as u32,
            order_no,
            ..entity.clone()
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<ChecklistEntry>> {
        let conn = self.conn.lock().await;
        find_by_id_in(&conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<ChecklistEntry>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM entries ORDER BY template_id, order_no, id",
            ENTRY_COLUMNS
        ))?;
        let entries = stmt
            .query_map([], row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Write the mutable fields. The stored order number is left alone.
    async fn update(&self, entity: &ChecklistEntry) -> DomainResult<ChecklistEntry> {
        let conn = self.conn.lock().await;

        let (code, mandatory, file_name, file_size) = body_columns(&entity.body);
        let changed = conn.execute(
            "UPDATE entries SET details = ?, response_type = ?, mandatory = ?, file_name = ?, file_size = ?, updated_at = ? WHERE id = ?",
            params![
                entity.body.details(),
                code,
                mandatory,
                file_name,
                file_size,
                now_millis(),
                entity.id
            ],
        )?;
        if changed == 0 {
            return Err(DomainError::not_found("Entry", entity.id));
        }

        find_by_id_in(&conn, entity.id)?.ok_or_else(|| DomainError::not_found("Entry", entity.id))
    }

    /// Delete a single entry. Remaining order numbers are not renumbered.
    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let deleted = conn.execute("DELETE FROM entries WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(DomainError::not_found("Entry", id));
        }
        Ok(())
    }
}

pub(super) fn list_by_template_in(conn: &Connection, template_id: u32) -> DomainResult<Vec<ChecklistEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM entries WHERE template_id = ? ORDER BY order_no ASC, id ASC",
        ENTRY_COLUMNS
    ))?;
    let entries = stmt
        .query_map(params![template_id], row_to_entry)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

fn find_by_id_in(conn: &Connection, id: u32) -> DomainResult<Option<ChecklistEntry>> {
    let entry = conn
        .query_row(
            &format!("SELECT {} FROM entries WHERE id = ?", ENTRY_COLUMNS),
            params![id],
            row_to_entry,
        )
        .optional()?;
    Ok(entry)
}

/// Storage columns for a body: (response code, mandatory, file name, file size)
fn body_columns(body: &EntryBody) -> (i32, i32, Option<&str>, Option<i64>) {
    match body {
        EntryBody::SectionBreak { .. } => (SECTION_BREAK_CODE, 0, None, None),
        EntryBody::Item { response_type, mandatory, attachment, .. } => (
            response_type.code(),
            i32::from(*mandatory),
            attachment.as_ref().map(|a| a.file_name.as_str()),
            attachment.as_ref().map(|a| a.file_size),
        ),
    }
}

/// Convert a database row to ChecklistEntry
fn row_to_entry(row: &Row) -> rusqlite::Result<ChecklistEntry> {
    let details: String = row.get(2)?;
    let code: i32 = row.get(3)?;

    let body = if code == SECTION_BREAK_CODE {
        EntryBody::SectionBreak { details }
    } else {
        let file_name: Option<String> = row.get(6)?;
        let file_size: Option<i64> = row.get(7)?;
        EntryBody::Item {
            details,
            response_type: ResponseType::from_code(code),
            mandatory: row.get::<_, i32>(4)? != 0,
            attachment: file_name.map(|file_name| Attachment {
                file_name,
                file_size: file_size.unwrap_or(0),
            }),
        }
    };

    Ok(ChecklistEntry {
        id: row.get(0)?,
        template_id: row.get(1)?,
        order_no: row.get(5)?,
        body,
    })
}
