//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use helpdesk_core::error::CoreError;
use helpdesk_core::roles::{ROLE_ADMIN, ROLE_USER};
use helpdesk_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires the `user` role. Rejects with 403 Forbidden otherwise.
///
/// Used where only the ticket owner may act (filing and editing tickets).
pub struct RequireUser(pub AuthUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_USER {
            return Err(AppError::Core(CoreError::Forbidden(
                "User role required".into(),
            )));
        }
        Ok(RequireUser(user))
    }
}

/// An authenticated admin or end user.
///
/// Endpoints that serve both audiences take a `Caller` and branch on it;
/// any other role is rejected with 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Admin(DbId),
    User(DbId),
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        matches!(self, Caller::Admin(_))
    }

    /// The admin id to record on a log entry, `0` for end users.
    pub fn admin_id(&self) -> DbId {
        match self {
            Caller::Admin(id) => *id,
            Caller::User(_) => 0,
        }
    }

    /// The user id to record on a log entry, `0` for admins.
    pub fn user_id(&self) -> DbId {
        match self {
            Caller::Admin(_) => 0,
            Caller::User(id) => *id,
        }
    }

    /// Narrow a requested owner filter to what this caller may see.
    ///
    /// Admins get their filter as is; end users always get their own id.
    pub fn scope_user_filter(&self, requested: Option<DbId>) -> Option<DbId> {
        match self {
            Caller::Admin(_) => requested,
            Caller::User(id) => Some(*id),
        }
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role.as_str() {
            ROLE_ADMIN => Ok(Caller::Admin(user.user_id)),
            ROLE_USER => Ok(Caller::User(user.user_id)),
            _ => Err(AppError::Core(CoreError::Forbidden(
                "Admin or User role required".into(),
            ))),
        }
    }
}
