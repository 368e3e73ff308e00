//! Ticket status vocabulary, system-log comments and list-filter helpers.
//!
//! The status set is closed. A ticket starts at [`STATUS_NONE`] and only
//! changes status when a log entry is appended; no transition is ever
//! rejected, so a closed ticket can be reopened by a later log.

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Status of a freshly filed ticket that nobody has responded to yet.
pub const STATUS_NONE: &str = "none";
/// Acknowledged and waiting on staff.
pub const STATUS_OPEN: &str = "open";
/// Staff is working on it.
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// Staff believes the problem is solved.
pub const STATUS_RESOLVED: &str = "resolved";
/// No further work expected.
pub const STATUS_CLOSED: &str = "closed";

/// All valid ticket statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_NONE,
    STATUS_OPEN,
    STATUS_IN_PROGRESS,
    STATUS_RESOLVED,
    STATUS_CLOSED,
];

// ---------------------------------------------------------------------------
// System log comments
// ---------------------------------------------------------------------------

/// Comment on the readonly log appended when the owner edits a ticket.
pub const COMMENT_TICKET_MODIFIED: &str = "modified ticket content";
/// Comment on the readonly log appended when a ticket is deleted.
pub const COMMENT_TICKET_DELETED: &str = "deleted ticket";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid ticket status '{}'. Must be one of: {:?}",
            status, VALID_STATUSES
        )))
    }
}

// ---------------------------------------------------------------------------
// List filters
// ---------------------------------------------------------------------------

/// An id filter only applies when it is positive; `0` means "any".
pub fn id_filter(id: Option<DbId>) -> Option<DbId> {
    id.filter(|v| *v > 0)
}

/// A status filter only applies when it is non-empty.
pub fn status_filter(status: Option<&str>) -> Option<&str> {
    status.map(str::trim).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
