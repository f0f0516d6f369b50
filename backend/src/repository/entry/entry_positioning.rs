//! Entry Positioning Operations
//!
//! Operations for managing entry order numbers within a template.

use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::collections::HashSet;

use crate::domain::{DomainError, DomainResult};
use super::super::db::now_millis;
use super::super::template_repo::template_exists;

/// Trait for entry positioning operations
#[async_trait]
pub trait EntryPositioningOperations {
    /// Get next order number for a template (max + 1, starting at 1)
    async fn next_order_no(&self, template_id: u32) -> DomainResult<i32>;

    /// Apply a complete `(entry id, order number)` assignment in one transaction.
    ///
    /// The ids must be exactly the template's stored entries and the order
    /// numbers exactly 1..N; otherwise nothing is written.
    async fn reorder_batch(&self, template_id: u32, items: &[(u32, i32)]) -> DomainResult<()>;
}

#[async_trait]
impl EntryPositioningOperations for super::entry_repo::EntryRepository {
    async fn next_order_no(&self, template_id: u32) -> DomainResult<i32> {
        let conn = self.conn.lock().await;
        next_order_no_in(&conn, template_id)
    }

    async fn reorder_batch(&self, template_id: u32, items: &[(u32, i32)]) -> DomainResult<()> {
        validate_assignment(items)?;

        let mut guard = self.conn.lock().await;
        let tx = guard.transaction()?;

        if !template_exists(&tx, template_id)? {
            return Err(DomainError::not_found("Template", template_id));
        }

        let stored: HashSet<u32> = {
            let mut stmt = tx.prepare("SELECT id FROM entries WHERE template_id = ?")?;
            let ids = stmt
                .query_map(params![template_id], |row| row.get::<_, u32>(0))?
                .collect::<Result<HashSet<_>, _>>()?;
            ids
        };
        let requested: HashSet<u32> = items.iter().map(|(id, _)| *id).collect();

        if stored != requested {
            tracing::warn!(
                template_id,
                stored = stored.len(),
                requested = requested.len(),
                "reorder rejected: entry set changed"
            );
            return Err(DomainError::ConflictDuringReorder(format!(
                "template {} has {} entries but the reorder names {} (or different ids)",
                template_id,
                stored.len(),
                requested.len()
            )));
        }

        let now = now_millis();
        for (id, order_no) in items {
            tx.execute(
                "UPDATE entries SET order_no = ?, updated_at = ? WHERE id = ? AND template_id = ?",
                params![*order_no, now, *id, template_id],
            )?;
        }

        tx.commit()?;
        tracing::debug!(template_id, count = items.len(), "entries reordered");
        Ok(())
    }
}

pub(super) fn next_order_no_in(conn: &Connection, template_id: u32) -> DomainResult<i32> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(order_no), 0) + 1 FROM entries WHERE template_id = ?",
        params![template_id],
        |row| row.get::<_, i32>(0),
    )?;
    Ok(next)
}

/// Ids unique, order numbers exactly 1..N
fn validate_assignment(items: &[(u32, i32)]) -> DomainResult<()> {
    let mut ids = HashSet::with_capacity(items.len());
    let mut order_nos: Vec<i32> = Vec::with_capacity(items.len());

    for (id, order_no) in items {
        if !ids.insert(*id) {
            return Err(DomainError::validation(format!("entry {} appears twice in reorder", id)));
        }
        order_nos.push(*order_no);
    }

    order_nos.sort_unstable();
    let dense = order_nos
        .iter()
        .enumerate()
        .all(|(i, n)| *n == i as i32 + 1);
    if !dense {
        return Err(DomainError::validation("reorder order numbers must be exactly 1..N"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_assignment() {
        assert!(validate_assignment(&[]).is_ok());
        assert!(validate_assignment(&[(7, 2), (3, 1), (9, 3)]).is_ok());
        assert!(validate_assignment(&[(7, 1), (7, 2)]).is_err());
        assert!(validate_assignment(&[(1, 1), (2, 3)]).is_err());
        assert!(validate_assignment(&[(1, 0), (2, 1)]).is_err());
    }
}
