//! Errors raised by the repository layer.

use helpdesk_core::types::DbId;

/// Failure of a repository operation.
///
/// Database failures pass through untouched; the other variants are the
/// argument and ownership checks the repositories perform themselves.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A non-positive id was passed to an operation that addresses a row.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The row is absent, disabled, or belongs to someone else.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The log entry is system-generated and cannot be disabled.
    #[error("Ticket log {id} is readonly")]
    Readonly { id: DbId },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Reject ids that can never address a row.
pub(crate) fn require_positive_id(field: &str, id: DbId) -> Result<(), StoreError> {
    if id <= 0 {
        return Err(StoreError::InvalidArgument(format!(
            "{field} must be positive, got {id}"
        )));
    }
    Ok(())
}
