//! Handlers for tickets.
//!
//! End users file and edit their own tickets. Admins see every ticket;
//! end users calling list/count/get are silently scoped to their own.
//! Edits and deletions are journaled with a readonly system log that
//! carries the ticket's current status forward unchanged.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use helpdesk_core::error::CoreError;
use helpdesk_core::ticket::{
    status_filter, validate_status, COMMENT_TICKET_DELETED, COMMENT_TICKET_MODIFIED,
};
use helpdesk_core::types::DbId;
use helpdesk_db::models::ticket::{CreateTicket, Ticket, TicketFilter, UpdateTicket};
use helpdesk_db::models::ticket_log::CreateTicketLog;
use helpdesk_db::repositories::{CategoryRepo, TicketLogRepo, TicketRepo, UserRepo};
use serde::Deserialize;
use sqlx::PgConnection;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::ticket_logs::log_authors;
use crate::middleware::rbac::{Caller, RequireUser};
use crate::query::PaginationParams;
use crate::response::{CountResponse, CreatedId, DataResponse};
use crate::state::AppState;
use crate::views::{LogView, TicketView};

// ---------------------------------------------------------------------------
// Request bodies and query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicketRequest {
    /// `0` or omitted for uncategorized.
    #[serde(default)]
    pub category_id: DbId,
    #[validate(length(min = 1, max = 255))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(max = 65535))]
    pub body: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTicketRequest {
    #[serde(default)]
    pub category_id: DbId,
    #[validate(length(min = 1, max = 255))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(max = 65535))]
    pub body: String,
}

/// Filters shared by `GET /tickets` and `GET /tickets/count`.
#[derive(Debug, Default, Deserialize)]
pub struct TicketQueryParams {
    pub user_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub status: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl TicketQueryParams {
    /// Build the repository filter, narrowed to what `caller` may see.
    fn filter_for(&self, caller: &Caller) -> AppResult<TicketFilter> {
        if let Some(status) = status_filter(self.status.as_deref()) {
            validate_status(status)?;
        }
        Ok(TicketFilter {
            user_id: caller.scope_user_filter(self.user_id),
            category_id: self.category_id,
            status: self.status.clone(),
        })
    }

    fn page(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load an enabled ticket `caller` may act on.
///
/// End users only reach their own tickets; anything else is `NotFound`,
/// the same answer as for a ticket that does not exist.
pub(crate) async fn load_ticket_for(
    conn: &mut PgConnection,
    caller: &Caller,
    ticket_id: DbId,
) -> AppResult<Ticket> {
    if ticket_id <= 0 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "ticket id must be positive, got {ticket_id}"
        ))));
    }
    if let Caller::User(user_id) = caller {
        TicketRepo::check_ownership(conn, *user_id, ticket_id).await?;
    }
    TicketRepo::find_enabled(conn, ticket_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id: ticket_id,
        }))
}

/// A non-zero category must be enabled and open to end users.
///
/// `keep` is the ticket's current category, which may stay as is even if
/// it has since been switched off or disabled.
async fn ensure_selectable_category(
    conn: &mut PgConnection,
    category_id: DbId,
    keep: Option<DbId>,
) -> AppResult<()> {
    if category_id == 0 || keep == Some(category_id) {
        return Ok(());
    }
    match CategoryRepo::find_enabled(conn, category_id).await? {
        Some(category) if category.is_on => Ok(()),
        _ => Err(AppError::Core(CoreError::Validation(format!(
            "Category {category_id} is not available"
        )))),
    }
}

/// Denormalize category, owner and latest log onto a ticket.
async fn ticket_view(
    conn: &mut PgConnection,
    ticket: Ticket,
    caller: &Caller,
) -> AppResult<TicketView> {
    let category = if ticket.category_id > 0 {
        CategoryRepo::find_enabled(conn, ticket.category_id).await?
    } else {
        None
    };
    let user = UserRepo::find_summary(conn, ticket.user_id).await?;
    let latest_log = match TicketLogRepo::find_latest(conn, ticket.id).await? {
        Some(log) => {
            let authors = log_authors(conn, &log).await?;
            Some(LogView::project(log, authors, caller))
        }
        None => None,
    };
    Ok(TicketView::new(ticket, category, user, latest_log))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /tickets
pub async fn create_ticket(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTicketRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let mut conn = state.pool.acquire().await?;
    ensure_selectable_category(&mut conn, input.category_id, None).await?;

    let id = TicketRepo::create(
        &mut conn,
        &CreateTicket {
            user_id: user.user_id,
            category_id: input.category_id,
            subject: input.subject,
            body: input.body,
        },
    )
    .await?;

    tracing::info!(user_id = user.user_id, ticket_id = id, "Ticket created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: CreatedId { id } })))
}

/// PUT /tickets/{id}
///
/// Replaces category, subject and body, then journals the edit.
pub async fn update_ticket(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTicketRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let caller = Caller::User(user.user_id);
    let mut tx = state.pool.begin().await?;

    let current = load_ticket_for(&mut tx, &caller, id).await?;
    ensure_selectable_category(&mut tx, input.category_id, Some(current.category_id)).await?;

    let updated = TicketRepo::update(
        &mut tx,
        id,
        &UpdateTicket {
            category_id: input.category_id,
            subject: input.subject,
            body: input.body,
        },
    )
    .await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }));
    }

    TicketLogRepo::create(
        &mut tx,
        &CreateTicketLog {
            admin_id: 0,
            user_id: user.user_id,
            ticket_id: id,
            status: current.status,
            comment: COMMENT_TICKET_MODIFIED.to_string(),
            is_readonly: true,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(user_id = user.user_id, ticket_id = id, "Ticket updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /tickets/{id}
///
/// Journals the deletion with the ticket's prior status, then disables it.
/// Owners may delete their own tickets; admins may delete any.
pub async fn delete_ticket(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;

    let ticket = load_ticket_for(&mut tx, &caller, id).await?;

    TicketLogRepo::create(
        &mut tx,
        &CreateTicketLog {
            admin_id: caller.admin_id(),
            user_id: caller.user_id(),
            ticket_id: id,
            status: ticket.status,
            comment: COMMENT_TICKET_DELETED.to_string(),
            is_readonly: true,
        },
    )
    .await?;
    TicketRepo::disable(&mut tx, id).await?;

    tx.commit().await?;

    tracing::info!(
        admin_id = caller.admin_id(),
        user_id = caller.user_id(),
        ticket_id = id,
        "Ticket deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /tickets/count?user_id=&category_id=&status=
pub async fn count_tickets(
    caller: Caller,
    State(state): State<AppState>,
    Query(params): Query<TicketQueryParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.filter_for(&caller)?;

    let mut conn = state.pool.acquire().await?;
    let count = TicketRepo::count_all(&mut conn, &filter).await?;

    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}

/// GET /tickets?user_id=&category_id=&status=&offset=&limit=
///
/// Newest first.
pub async fn list_tickets(
    caller: Caller,
    State(state): State<AppState>,
    Query(params): Query<TicketQueryParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.filter_for(&caller)?;
    let (offset, limit) = params.page().resolve();

    let mut conn = state.pool.acquire().await?;
    let tickets = TicketRepo::list(&mut conn, &filter, offset, limit).await?;

    let mut views = Vec::with_capacity(tickets.len());
    for ticket in tickets {
        views.push(ticket_view(&mut conn, ticket, &caller).await?);
    }

    Ok(Json(DataResponse { data: views }))
}

/// GET /tickets/{id}
///
/// Admins get `data: null` for an absent ticket; end users get 404 for
/// anything that is not theirs.
pub async fn get_ticket(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;

    let ticket = match caller {
        Caller::Admin(_) => TicketRepo::find_enabled(&mut conn, id).await?,
        Caller::User(_) => Some(load_ticket_for(&mut conn, &caller, id).await?),
    };

    let view = match ticket {
        Some(ticket) => Some(ticket_view(&mut conn, ticket, &caller).await?),
        None => None,
    };

    Ok(Json(DataResponse { data: view }))
}
