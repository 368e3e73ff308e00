//! Account rows used to label tickets and log entries.

use helpdesk_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Display summary of an admin or end user.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct UserSummary {
    pub id: DbId,
    pub username: String,
    pub full_name: String,
}

/// DTO for inserting an account row.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub full_name: String,
    pub role: String,
}
