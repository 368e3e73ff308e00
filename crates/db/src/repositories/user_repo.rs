//! Repository for the `users` table.
//!
//! The account service owns these rows; ticketing only reads them to put
//! names next to tickets and log entries.

use helpdesk_core::types::DbId;
use sqlx::PgConnection;

use crate::models::user::{CreateUser, UserSummary};

/// Provides account lookups.
pub struct UserRepo;

impl UserRepo {
    /// Display summary of an active account, `None` if unknown or inactive.
    pub async fn find_summary(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, username, full_name FROM users WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Insert an account row, returning its summary.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateUser,
    ) -> Result<UserSummary, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "INSERT INTO users (username, full_name, role) VALUES ($1, $2, $3) \
             RETURNING id, username, full_name",
        )
        .bind(&input.username)
        .bind(&input.full_name)
        .bind(&input.role)
        .fetch_one(&mut *conn)
        .await
    }

    /// Deactivate an account. Returns `true` if a row was touched.
    pub async fn deactivate(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
