//! Route definitions for individual ticket log entries.
//!
//! Mounted at `/ticket-logs` by `api_routes()`.

use axum::routing::delete;
use axum::Router;

use crate::handlers::ticket_logs;
use crate::state::AppState;

/// ```text
/// DELETE /{id}    -> delete_log
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(ticket_logs::delete_log))
}
