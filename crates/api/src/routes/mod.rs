pub mod categories;
pub mod health;
pub mod ticket_logs;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ticket-categories                   list (admin), create (admin)
/// /ticket-categories/available         list selectable categories
/// /ticket-categories/{id}              get, update (admin), delete (admin)
///
/// /tickets                             list (scoped), create (user)
/// /tickets/count                       count (scoped)
/// /tickets/{id}                        get, update (owner), delete
/// /tickets/{id}/logs                   list, append
/// /tickets/{id}/logs/count             count
///
/// /ticket-logs/{id}                    delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/ticket-categories", categories::router())
        .nest("/tickets", tickets::router())
        .nest("/ticket-logs", ticket_logs::router())
}
