//! Handlers for the ticket journal.
//!
//! Appending a log entry is how a ticket's status moves. Both staff and the
//! ticket owner may append; only staff see who wrote each entry.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use helpdesk_core::ticket::{status_filter, validate_status};
use helpdesk_core::types::DbId;
use helpdesk_db::models::ticket_log::{CreateTicketLog, TicketLog};
use helpdesk_db::repositories::{TicketLogRepo, UserRepo};
use serde::Deserialize;
use sqlx::PgConnection;
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::tickets::load_ticket_for;
use crate::middleware::rbac::Caller;
use crate::query::PaginationParams;
use crate::response::{CountResponse, CreatedId, DataResponse};
use crate::state::AppState;
use crate::views::{LogAuthors, LogView};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLogRequest {
    /// Omitted or empty keeps the ticket's current status.
    pub status: Option<String>,
    #[serde(default)]
    #[validate(length(max = 65535))]
    pub comment: String,
}

/// Resolve the display records of whoever wrote `log`.
pub(crate) async fn log_authors(
    conn: &mut PgConnection,
    log: &TicketLog,
) -> AppResult<LogAuthors> {
    let admin = if log.admin_id > 0 {
        UserRepo::find_summary(conn, log.admin_id).await?
    } else {
        None
    };
    let user = if log.user_id > 0 {
        UserRepo::find_summary(conn, log.user_id).await?
    } else {
        None
    };
    Ok(LogAuthors {
        admin_id: log.admin_id,
        user_id: log.user_id,
        admin,
        user,
    })
}

/// POST /tickets/{id}/logs
pub async fn create_log(
    caller: Caller,
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
    Json(input): Json<CreateLogRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let requested = status_filter(input.status.as_deref());
    if let Some(status) = requested {
        validate_status(status)?;
    }

    let mut tx = state.pool.begin().await?;

    let ticket = load_ticket_for(&mut tx, &caller, ticket_id).await?;
    let status = requested.map_or(ticket.status, str::to_string);

    let id = TicketLogRepo::create(
        &mut tx,
        &CreateTicketLog {
            admin_id: caller.admin_id(),
            user_id: caller.user_id(),
            ticket_id,
            status,
            comment: input.comment,
            is_readonly: false,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        admin_id = caller.admin_id(),
        user_id = caller.user_id(),
        ticket_id,
        log_id = id,
        "Ticket log created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: CreatedId { id } })))
}

/// DELETE /ticket-logs/{id}
///
/// End users may remove any entry on a ticket they own, staff replies
/// included. System entries are refused with 409 regardless of caller.
pub async fn delete_log(
    caller: Caller,
    State(state): State<AppState>,
    Path(log_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;

    if let Caller::User(user_id) = caller {
        TicketLogRepo::check_ownership(&mut conn, user_id, log_id).await?;
    }
    TicketLogRepo::disable(&mut conn, log_id).await?;

    tracing::info!(
        admin_id = caller.admin_id(),
        user_id = caller.user_id(),
        log_id,
        "Ticket log disabled"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /tickets/{id}/logs/count
pub async fn count_logs(
    caller: Caller,
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;
    load_ticket_for(&mut conn, &caller, ticket_id).await?;

    let count = TicketLogRepo::count(&mut conn, ticket_id).await?;

    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}

/// GET /tickets/{id}/logs?offset=&limit=
///
/// Newest first. Author fields are present for admins only.
pub async fn list_logs(
    caller: Caller,
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (offset, limit) = params.resolve();

    let mut conn = state.pool.acquire().await?;
    load_ticket_for(&mut conn, &caller, ticket_id).await?;

    let logs = TicketLogRepo::list(&mut conn, ticket_id, offset, limit).await?;

    let mut views = Vec::with_capacity(logs.len());
    for log in logs {
        let authors = if caller.is_admin() {
            log_authors(&mut conn, &log).await?
        } else {
            LogAuthors::default()
        };
        views.push(LogView::project(log, authors, &caller));
    }

    Ok(Json(DataResponse { data: views }))
}
