//! Soft-delete lifecycle shared by categories, tickets and ticket logs.
//!
//! Rows are never removed. Visibility is carried by a SMALLINT `state`
//! column, and every read goes through [`select_active`] or
//! [`count_active`] so the active-only predicate cannot be forgotten.

use serde::Serialize;

/// Lifecycle of a soft-deletable row. Stored as SMALLINT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[repr(i16)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    Disabled = 0,
    Enabled = 1,
}

impl RecordState {
    /// Return the stored SMALLINT value.
    pub fn id(self) -> i16 {
        self as i16
    }
}

/// `WHERE`-clause fragment matching only enabled rows.
pub(crate) fn active_predicate() -> String {
    format!("state = {}", RecordState::Enabled.id())
}

/// `SELECT {columns} FROM {table} WHERE state = <enabled>`.
///
/// Callers append further conditions with `AND ...`.
pub(crate) fn select_active(columns: &str, table: &str) -> String {
    format!("SELECT {columns} FROM {table} WHERE {}", active_predicate())
}

/// `SELECT COUNT(*) FROM {table} WHERE state = <enabled>`.
pub(crate) fn count_active(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {table} WHERE {}", active_predicate())
}

/// `UPDATE {table} SET state = $2 WHERE id = $1`.
pub(crate) fn set_state(table: &str) -> String {
    format!("UPDATE {table} SET state = $2 WHERE id = $1")
}
