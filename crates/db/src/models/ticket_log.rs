//! Ticket log model.

use helpdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::lifecycle::RecordState;

/// A row from the `ticket_logs` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TicketLog {
    pub id: DbId,
    /// `0` unless written by an admin.
    pub admin_id: DbId,
    /// `0` unless written by an end user.
    pub user_id: DbId,
    pub ticket_id: DbId,
    /// Ticket status as of this entry.
    pub status: String,
    pub comment: String,
    /// System-generated entries are readonly and cannot be disabled.
    pub is_readonly: bool,
    pub state: RecordState,
    pub created_at: Timestamp,
}

/// DTO for appending a log entry.
#[derive(Debug, Deserialize)]
pub struct CreateTicketLog {
    pub admin_id: DbId,
    pub user_id: DbId,
    pub ticket_id: DbId,
    pub status: String,
    pub comment: String,
    pub is_readonly: bool,
}
