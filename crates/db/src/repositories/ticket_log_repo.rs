//! Repository for the `ticket_logs` table.
//!
//! [`TicketLogRepo::create`] is the only writer of a ticket's status: the log
//! insert and the status update run in one transaction (a savepoint when the
//! caller already holds one), so either both rows change or neither does.

use helpdesk_core::types::DbId;
use sqlx::{Connection, PgConnection};

use crate::error::{require_positive_id, StoreError};
use crate::lifecycle::{count_active, select_active, RecordState};
use crate::models::ticket_log::{CreateTicketLog, TicketLog};
use crate::repositories::TicketRepo;

/// Column list for ticket_logs queries.
const COLUMNS: &str = "\
    id, admin_id, user_id, ticket_id, status, comment, is_readonly, \
    state, created_at";

const TABLE: &str = "ticket_logs";

/// Provides the append-only ticket journal.
pub struct TicketLogRepo;

impl TicketLogRepo {
    /// Append a log entry and move the parent ticket to `input.status`.
    ///
    /// Fails with `InvalidArgument` for a non-positive ticket ID and with
    /// `NotFound` if the ticket row does not exist; nothing is written in
    /// either case.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateTicketLog,
    ) -> Result<DbId, StoreError> {
        require_positive_id("ticket id", input.ticket_id)?;

        let mut tx = conn.begin().await?;

        if !TicketRepo::update_status(&mut tx, input.ticket_id, &input.status).await? {
            return Err(StoreError::NotFound {
                entity: "Ticket",
                id: input.ticket_id,
            });
        }

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO ticket_logs \
                (admin_id, user_id, ticket_id, status, comment, is_readonly, state) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id",
        )
        .bind(input.admin_id)
        .bind(input.user_id)
        .bind(input.ticket_id)
        .bind(&input.status)
        .bind(&input.comment)
        .bind(input.is_readonly)
        .bind(RecordState::Enabled)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            log_id = id,
            ticket_id = input.ticket_id,
            status = %input.status,
            is_readonly = input.is_readonly,
            "Ticket log appended",
        );

        Ok(id)
    }

    /// Count enabled log entries of a ticket.
    pub async fn count(conn: &mut PgConnection, ticket_id: DbId) -> Result<i64, sqlx::Error> {
        let query = format!("{} AND ticket_id = $1", count_active(TABLE));
        sqlx::query_scalar(&query)
            .bind(ticket_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// List enabled log entries of a ticket, newest first.
    pub async fn list(
        conn: &mut PgConnection,
        ticket_id: DbId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<TicketLog>, sqlx::Error> {
        let query = format!(
            "{} AND ticket_id = $1 ORDER BY id DESC LIMIT $2 OFFSET $3",
            select_active(COLUMNS, TABLE)
        );
        sqlx::query_as::<_, TicketLog>(&query)
            .bind(ticket_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
    }

    /// Succeed only if `log_id` is an enabled entry on an enabled ticket
    /// owned by `user_id`. Who wrote the entry does not matter.
    pub async fn check_ownership(
        conn: &mut PgConnection,
        user_id: DbId,
        log_id: DbId,
    ) -> Result<(), StoreError> {
        let owned: bool = sqlx::query_scalar(
            "SELECT EXISTS (\
                SELECT 1 FROM ticket_logs l \
                JOIN tickets t ON t.id = l.ticket_id \
                WHERE l.id = $1 AND t.user_id = $2 \
                AND l.state = $3 AND t.state = $3)",
        )
        .bind(log_id)
        .bind(user_id)
        .bind(RecordState::Enabled)
        .fetch_one(&mut *conn)
        .await?;

        if owned {
            Ok(())
        } else {
            Err(StoreError::NotFound {
                entity: "TicketLog",
                id: log_id,
            })
        }
    }

    /// Whether the entry is system-generated. Unknown IDs are not readonly.
    pub async fn is_readonly(conn: &mut PgConnection, log_id: DbId) -> Result<bool, sqlx::Error> {
        let readonly: Option<bool> =
            sqlx::query_scalar("SELECT is_readonly FROM ticket_logs WHERE id = $1")
                .bind(log_id)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(readonly.unwrap_or(false))
    }

    /// Hide a log entry. The parent ticket's status is left as is.
    ///
    /// Readonly entries are refused with `Readonly` and stay enabled; an
    /// absent or already disabled entry yields `NotFound`.
    pub async fn disable(conn: &mut PgConnection, log_id: DbId) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE ticket_logs SET state = $2 \
             WHERE id = $1 AND state = $3 AND is_readonly = false",
        )
        .bind(log_id)
        .bind(RecordState::Disabled)
        .bind(RecordState::Enabled)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }
        if Self::is_readonly(conn, log_id).await? {
            return Err(StoreError::Readonly { id: log_id });
        }
        Err(StoreError::NotFound {
            entity: "TicketLog",
            id: log_id,
        })
    }

    /// Most recent enabled entry of a ticket.
    pub async fn find_latest(
        conn: &mut PgConnection,
        ticket_id: DbId,
    ) -> Result<Option<TicketLog>, sqlx::Error> {
        let query = format!(
            "{} AND ticket_id = $1 ORDER BY id DESC LIMIT 1",
            select_active(COLUMNS, TABLE)
        );
        sqlx::query_as::<_, TicketLog>(&query)
            .bind(ticket_id)
            .fetch_optional(&mut *conn)
            .await
    }
}
