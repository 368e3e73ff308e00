//! Bearer-token extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use helpdesk_core::error::CoreError;
use helpdesk_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The account behind a valid `Authorization: Bearer <jwt>` header.
///
/// Rejects with 401 when the header is missing or malformed, or when the
/// token fails validation or names a non-positive subject. Role checks are left to the
/// [`rbac`](super::rbac) extractors.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// `claims.sub`.
    pub user_id: DbId,
    /// `claims.role`.
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            unauthorized("Invalid or expired token")
        })?;

        Ok(AuthUser {
            user_id: subject_id(claims.sub)?,
            role: claims.role,
        })
    }
}

/// Account ids are positive; a token naming any other subject is rejected.
fn subject_id(sub: DbId) -> Result<DbId, AppError> {
    if sub > 0 {
        Ok(sub)
    } else {
        Err(unauthorized("Token subject must be a positive account id"))
    }
}

/// Pull the raw token out of the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| unauthorized("Authorization header is not valid ASCII"))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| unauthorized("Expected Authorization: Bearer <token>"))
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        assert_matches!(
            bearer_token(&HeaderMap::new()),
            Err(AppError::Core(CoreError::Unauthorized(_)))
        );
    }

    #[test]
    fn other_schemes_are_unauthorized() {
        assert_matches!(
            bearer_token(&headers_with("Basic dXNlcjpwYXNz")),
            Err(AppError::Core(CoreError::Unauthorized(_)))
        );
        assert_matches!(
            bearer_token(&headers_with("Bearer ")),
            Err(AppError::Core(CoreError::Unauthorized(_)))
        );
    }

    #[test]
    fn non_positive_subject_is_unauthorized() {
        assert_eq!(subject_id(7).unwrap(), 7);
        assert_matches!(subject_id(0), Err(AppError::Core(CoreError::Unauthorized(_))));
        assert_matches!(subject_id(-3), Err(AppError::Core(CoreError::Unauthorized(_))));
    }
}
