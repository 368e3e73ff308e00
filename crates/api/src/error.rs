use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use helpdesk_core::error::CoreError;
use helpdesk_db::error::StoreError;
use serde::Serialize;

/// Error type returned by every handler and extractor.
///
/// Responses are `{"error": <message>, "code": <CODE>}`. Database
/// failures are logged here and reach the client only as a generic
/// message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidArgument(msg) => AppError::Core(CoreError::Validation(msg)),
            StoreError::NotFound { entity, id } => {
                AppError::Core(CoreError::NotFound { entity, id })
            }
            StoreError::Readonly { id } => AppError::Core(CoreError::Conflict(format!(
                "Ticket log {id} is readonly and cannot be deleted"
            ))),
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(err.to_string()))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    /// HTTP status, machine-readable code and client-facing message.
    fn status_and_code(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            AppError::Core(CoreError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Core(CoreError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone())
            }
            AppError::Database(err) => classify_sqlx_error(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.status_and_code();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

/// Map a sqlx error onto a response.
///
/// Unique violations on `uq_*` constraints become 409. Everything else is
/// logged and answered with a sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::Database(db_err) = err {
        // 23505: unique_violation
        if db_err.code().as_deref() == Some("23505") {
            if let Some(constraint) = db_err.constraint().filter(|c| c.starts_with("uq_")) {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
        }
    }

    tracing::error!(error = %err, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn store_errors_map_to_domain_errors() {
        assert_matches!(
            AppError::from(StoreError::InvalidArgument("ticket id".into())),
            AppError::Core(CoreError::Validation(_))
        );
        assert_matches!(
            AppError::from(StoreError::NotFound { entity: "Ticket", id: 3 }),
            AppError::Core(CoreError::NotFound { entity: "Ticket", id: 3 })
        );
        assert_matches!(
            AppError::from(StoreError::Readonly { id: 9 }),
            AppError::Core(CoreError::Conflict(_))
        );
    }

    #[test]
    fn status_codes_per_variant() {
        let cases = [
            (AppError::from(StoreError::Readonly { id: 9 }), StatusCode::CONFLICT, "CONFLICT"),
            (
                AppError::from(StoreError::NotFound { entity: "TicketLog", id: 1 }),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                AppError::Core(CoreError::Forbidden("no".into())),
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
            ),
            (
                AppError::Core(CoreError::Validation("bad".into())),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code().0, status);
            assert_eq!(err.status_and_code().1, code);
        }
    }

    #[test]
    fn database_details_are_not_leaked() {
        let err = AppError::Database(sqlx::Error::Configuration(
            "connection string was postgres://secret".into(),
        ));
        let (status, code, message) = err.status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
        assert_eq!(message, INTERNAL_MESSAGE);

        let (status, _, message) = AppError::Database(sqlx::Error::PoolTimedOut).status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, INTERNAL_MESSAGE);
    }
}
