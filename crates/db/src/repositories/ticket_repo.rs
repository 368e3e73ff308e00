//! Repository for the `tickets` table.
//!
//! Ticket status is deliberately not writable from outside this crate:
//! [`TicketRepo::update_status`] is only reachable through
//! [`TicketLogRepo::create`](super::TicketLogRepo::create), which pairs every
//! status change with a log entry.

use helpdesk_core::ticket::{id_filter, status_filter, STATUS_NONE};
use helpdesk_core::types::DbId;
use sqlx::PgConnection;

use crate::error::{require_positive_id, StoreError};
use crate::lifecycle::{count_active, select_active, set_state, RecordState};
use crate::models::ticket::{CreateTicket, Ticket, TicketFilter, UpdateTicket};

/// Column list for tickets queries.
const COLUMNS: &str = "\
    id, user_id, category_id, subject, body, status, state, \
    created_at, last_log_at";

const TABLE: &str = "tickets";

/// Optional filters, bound as `$1..$3`. A NULL parameter disables its filter.
const FILTERS: &str = "\
    AND ($1::BIGINT IS NULL OR user_id = $1) \
    AND ($2::BIGINT IS NULL OR category_id = $2) \
    AND ($3::TEXT IS NULL OR status = $3)";

/// Provides CRUD and filtered listing for tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// Mark a ticket enabled. Returns `true` if a row was touched.
    pub async fn enable(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        Self::set_state(conn, id, RecordState::Enabled).await
    }

    /// Mark a ticket disabled. Returns `true` if a row was touched.
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

    /// Find an enabled ticket by ID.
    pub async fn find_enabled(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("{} AND id = $1", select_active(COLUMNS, TABLE));
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// File a new ticket with status `none`, returning its ID.
    pub async fn create(conn: &mut PgConnection, input: &CreateTicket) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO tickets (user_id, category_id, subject, body, status, state, last_log_at) \
             VALUES ($1, $2, $3, $4, $5, $6, now()) \
             RETURNING id",
        )
        .bind(input.user_id)
        .bind(input.category_id)
        .bind(&input.subject)
        .bind(&input.body)
        .bind(STATUS_NONE)
        .bind(RecordState::Enabled)
        .fetch_one(&mut *conn)
        .await
    }

    /// Replace category, subject and body of an enabled ticket.
    ///
    /// Returns `false` if no enabled ticket has this ID.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<bool, StoreError> {
        require_positive_id("ticket id", id)?;

        let result = sqlx::query(
            "UPDATE tickets SET category_id = $2, subject = $3, body = $4 \
             WHERE id = $1 AND state = $5",
        )
        .bind(id)
        .bind(input.category_id)
        .bind(&input.subject)
        .bind(&input.body)
        .bind(RecordState::Enabled)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set status and bump `last_log_at`.
    ///
    /// Applies regardless of `state` so a deletion can still be journaled
    /// against a ticket being disabled in the same transaction.
    pub(crate) async fn update_status(
        conn: &mut PgConnection,
        id: DbId,
        status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE tickets SET status = $2, last_log_at = now() WHERE id = $1")
                .bind(id)
                .bind(status)
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count enabled tickets matching the filter.
    pub async fn count_all(
        conn: &mut PgConnection,
        filter: &TicketFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("{} {FILTERS}", count_active(TABLE));
        sqlx::query_scalar(&query)
            .bind(id_filter(filter.user_id))
            .bind(id_filter(filter.category_id))
            .bind(status_filter(filter.status.as_deref()))
            .fetch_one(&mut *conn)
            .await
    }

    /// List enabled tickets matching the filter, newest first.
    pub async fn list(
        conn: &mut PgConnection,
        filter: &TicketFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!(
            "{} {FILTERS} ORDER BY id DESC LIMIT $4 OFFSET $5",
            select_active(COLUMNS, TABLE)
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id_filter(filter.user_id))
            .bind(id_filter(filter.category_id))
            .bind(status_filter(filter.status.as_deref()))
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
    }

    /// Succeed only if `ticket_id` is an enabled ticket owned by `user_id`.
    ///
    /// Absent, disabled and foreign tickets all yield the same `NotFound`.
    pub async fn check_ownership(
        conn: &mut PgConnection,
        user_id: DbId,
        ticket_id: DbId,
    ) -> Result<(), StoreError> {
        let query = format!(
            "SELECT EXISTS ({} AND id = $1 AND user_id = $2)",
            select_active("1", TABLE)
        );
        let owned: bool = sqlx::query_scalar(&query)
            .bind(ticket_id)
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await?;

        if owned {
            Ok(())
        } else {
            Err(StoreError::NotFound {
                entity: "Ticket",
                id: ticket_id,
            })
        }
    }

    /// Current status of an enabled ticket.
    pub async fn find_status(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let query = format!("{} AND id = $1", select_active("status", TABLE));
        sqlx::query_scalar(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }
}
