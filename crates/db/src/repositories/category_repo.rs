//! Repository for the `ticket_categories` table.

use helpdesk_core::types::DbId;
use sqlx::PgConnection;

use crate::error::{require_positive_id, StoreError};
use crate::lifecycle::{select_active, set_state, RecordState};
use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Column list for ticket_categories queries.
const COLUMNS: &str = "id, name, is_on, state, sort_order";

const TABLE: &str = "ticket_categories";

/// Display order shared by both list queries.
const ORDER_BY: &str = "ORDER BY sort_order DESC, id ASC";

/// Provides CRUD operations for ticket categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Mark a category enabled. Returns `true` if a row was touched.
    pub async fn enable(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        Self::set_state(conn, id, RecordState::Enabled).await
    }

    /// Mark a category disabled. Tickets referencing it are left alone.
    pub async fn disable(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        Self::set_state(conn, id, RecordState::Disabled).await
    }

    async fn set_state(
        conn: &mut PgConnection,
        id: DbId,
        state: RecordState,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&set_state(TABLE))
            .bind(id)
            .bind(state)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find an enabled category by ID.
    pub async fn find_enabled(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("{} AND id = $1", select_active(COLUMNS, TABLE));
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Name of an enabled category, or an empty string when there is none.
    pub async fn find_name(conn: &mut PgConnection, id: DbId) -> Result<String, sqlx::Error> {
        let query = format!("{} AND id = $1", select_active("name", TABLE));
        let name: Option<String> = sqlx::query_scalar(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(name.unwrap_or_default())
    }

    /// Create a category that is enabled and selectable, returning its ID.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateCategory,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO ticket_categories (name, is_on, state) \
             VALUES ($1, true, $2) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(RecordState::Enabled)
        .fetch_one(&mut *conn)
        .await
    }

    /// Update name and selectability of an enabled category.
    ///
    /// Returns `false` if no enabled category has this ID.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<bool, StoreError> {
        require_positive_id("category id", id)?;

        let result = sqlx::query(
            "UPDATE ticket_categories SET name = $2, is_on = $3 \
             WHERE id = $1 AND state = $4",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.is_on)
        .bind(RecordState::Enabled)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List every enabled category in display order.
    pub async fn list_all_enabled(conn: &mut PgConnection) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("{} {ORDER_BY}", select_active(COLUMNS, TABLE));
        sqlx::query_as::<_, Category>(&query)
            .fetch_all(&mut *conn)
            .await
    }

    /// List enabled categories end users may pick, in display order.
    pub async fn list_all_enabled_and_on(
        conn: &mut PgConnection,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "{} AND is_on = true {ORDER_BY}",
            select_active(COLUMNS, TABLE)
        );
        sqlx::query_as::<_, Category>(&query)
            .fetch_all(&mut *conn)
            .await
    }
}
