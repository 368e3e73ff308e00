//! Route definitions for tickets and their logs.
//!
//! Mounted at `/tickets` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{ticket_logs, tickets};
use crate::state::AppState;

/// Ticket routes.
///
/// ```text
/// POST   /                  -> create_ticket (user)
/// GET    /                  -> list_tickets
/// GET    /count             -> count_tickets
/// GET    /{id}              -> get_ticket
/// PUT    /{id}              -> update_ticket (owner)
/// DELETE /{id}              -> delete_ticket
/// POST   /{id}/logs         -> create_log
/// GET    /{id}/logs         -> list_logs
/// GET    /{id}/logs/count   -> count_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets::list_tickets).post(tickets::create_ticket))
        .route("/count", get(tickets::count_tickets))
        .route(
            "/{id}",
            get(tickets::get_ticket)
                .put(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
        .route(
            "/{id}/logs",
            get(ticket_logs::list_logs).post(ticket_logs::create_log),
        )
        .route("/{id}/logs/count", get(ticket_logs::count_logs))
}
