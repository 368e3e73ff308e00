//! Route definitions for ticket categories.
//!
//! Mounted at `/ticket-categories` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Ticket category routes.
///
/// ```text
/// POST   /              -> create_category (admin)
/// GET    /              -> list_categories (admin)
/// GET    /available     -> list_available_categories
/// GET    /{id}          -> get_category
/// PUT    /{id}          -> update_category (admin)
/// DELETE /{id}          -> delete_category (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/available", get(categories::list_available_categories))
        .route(
            "/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
}
