//! Handlers for ticket categories.
//!
//! Staff manage the category list; end users may only read the enabled,
//! selectable subset.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use helpdesk_core::error::CoreError;
use helpdesk_core::types::DbId;
use helpdesk_db::models::category::{CreateCategory, UpdateCategory};
use helpdesk_db::repositories::CategoryRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{Caller, RequireAdmin};
use crate::response::{CreatedId, DataResponse};
use crate::state::AppState;
use crate::views::CategoryView;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub is_on: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /ticket-categories
///
/// The name is trimmed before it is validated.
pub async fn create_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    input.name = input.name.trim().to_string();
    input.validate()?;

    let mut conn = state.pool.acquire().await?;
    let id = CategoryRepo::create(
        &mut conn,
        &CreateCategory {
            name: input.name,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.user_id, category_id = id, "Ticket category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: CreatedId { id } })))
}

/// PUT /ticket-categories/{id}
pub async fn update_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    input.name = input.name.trim().to_string();
    input.validate()?;

    let mut conn = state.pool.acquire().await?;
    let updated = CategoryRepo::update(
        &mut conn,
        id,
        &UpdateCategory {
            name: input.name,
            is_on: input.is_on,
        },
    )
    .await?;

    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TicketCategory",
            id,
        }));
    }

    tracing::info!(
        admin_id = admin.user_id,
        category_id = id,
        is_on = input.is_on,
        "Ticket category updated"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /ticket-categories/{id}
///
/// Disables the category. Tickets keep pointing at it.
pub async fn delete_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;
    if !CategoryRepo::disable(&mut conn, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TicketCategory",
            id,
        }));
    }

    tracing::info!(admin_id = admin.user_id, category_id = id, "Ticket category disabled");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /ticket-categories
///
/// Every enabled category, including ones hidden from end users.
pub async fn list_categories(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;
    let categories: Vec<CategoryView> = CategoryRepo::list_all_enabled(&mut conn)
        .await?
        .into_iter()
        .map(CategoryView::from)
        .collect();

    Ok(Json(DataResponse { data: categories }))
}

/// GET /ticket-categories/available
///
/// Categories an end user may file a ticket under.
pub async fn list_available_categories(
    _caller: Caller,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;
    let categories: Vec<CategoryView> = CategoryRepo::list_all_enabled_and_on(&mut conn)
        .await?
        .into_iter()
        .map(CategoryView::from)
        .collect();

    Ok(Json(DataResponse { data: categories }))
}

/// GET /ticket-categories/{id}
///
/// `data` is `null` when the category is absent or disabled.
pub async fn get_category(
    _caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;
    let category = CategoryRepo::find_enabled(&mut conn, id)
        .await?
        .map(CategoryView::from);

    Ok(Json(DataResponse { data: category }))
}
