//! Ticket category model.

use helpdesk_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::lifecycle::RecordState;

/// A row from the `ticket_categories` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    /// Whether end users may pick this category when filing a ticket.
    pub is_on: bool,
    pub state: RecordState,
    pub sort_order: i32,
}

/// DTO for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
}

/// DTO for updating a category.
#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub name: String,
    pub is_on: bool,
}
