//! Ticket model.

use helpdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::lifecycle::RecordState;

/// A row from the `tickets` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Ticket {
    pub id: DbId,
    pub user_id: DbId,
    /// `0` when uncategorized.
    pub category_id: DbId,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub state: RecordState,
    pub created_at: Timestamp,
    pub last_log_at: Timestamp,
}

/// DTO for filing a new ticket.
#[derive(Debug, Deserialize)]
pub struct CreateTicket {
    pub user_id: DbId,
    pub category_id: DbId,
    pub subject: String,
    pub body: String,
}

/// DTO for editing a ticket's content. Status is not editable here.
#[derive(Debug, Deserialize)]
pub struct UpdateTicket {
    pub category_id: DbId,
    pub subject: String,
    pub body: String,
}

/// Optional filters for counting and listing tickets.
///
/// Ids apply only when positive, status only when non-empty.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TicketFilter {
    pub user_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub status: Option<String>,
}
