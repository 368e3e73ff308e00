//! Wire representations of categories, tickets and log entries.
//!
//! Handlers load rows and the related display records first, then hand
//! them to the projections here. Who may see what is decided in exactly
//! one place: [`LogView::project`] strips author identities unless the
//! caller is an admin.

use helpdesk_core::types::{DbId, Timestamp};
use helpdesk_db::models::category::Category;
use helpdesk_db::models::ticket::Ticket;
use helpdesk_db::models::ticket_log::TicketLog;
use helpdesk_db::models::user::UserSummary;
use serde::Serialize;

use crate::middleware::rbac::Caller;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A category as shown in pickers and on tickets.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: DbId,
    pub name: String,
    pub is_on: bool,
}

impl From<Category> for CategoryView {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            is_on: c.is_on,
        }
    }
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// Who wrote a log entry. Only ever serialized for admins.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogAuthors {
    pub admin_id: DbId,
    pub user_id: DbId,
    /// `None` when the entry was not admin-written or the account is gone.
    pub admin: Option<UserSummary>,
    /// `None` when the entry was not user-written or the account is gone.
    pub user: Option<UserSummary>,
}

/// A log entry as returned to API callers.
#[derive(Debug, Clone, Serialize)]
pub struct LogView {
    pub id: DbId,
    pub ticket_id: DbId,
    pub status: String,
    pub comment: String,
    pub is_readonly: bool,
    pub created_at: Timestamp,
    #[serde(flatten)]
    pub authors: Option<LogAuthors>,
}

impl LogView {
    /// Shape a log row for `caller`. End users never see author identities.
    pub fn project(log: TicketLog, authors: LogAuthors, caller: &Caller) -> Self {
        Self {
            id: log.id,
            ticket_id: log.ticket_id,
            status: log.status,
            comment: log.comment,
            is_readonly: log.is_readonly,
            created_at: log.created_at,
            authors: caller.is_admin().then_some(authors),
        }
    }
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// A ticket with its category, owner and latest log entry denormalized.
#[derive(Debug, Clone, Serialize)]
pub struct TicketView {
    pub id: DbId,
    pub user_id: DbId,
    pub category_id: DbId,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub created_at: Timestamp,
    pub last_log_at: Timestamp,
    /// `None` when uncategorized or the category has been disabled.
    pub category: Option<CategoryView>,
    /// `None` when the owner account no longer resolves.
    pub user: Option<UserSummary>,
    pub latest_log: Option<LogView>,
}

impl TicketView {
    pub fn new(
        ticket: Ticket,
        category: Option<Category>,
        user: Option<UserSummary>,
        latest_log: Option<LogView>,
    ) -> Self {
        Self {
            id: ticket.id,
            user_id: ticket.user_id,
            category_id: ticket.category_id,
            subject: ticket.subject,
            body: ticket.body,
            status: ticket.status,
            created_at: ticket.created_at,
            last_log_at: ticket.last_log_at,
            category: category.map(CategoryView::from),
            user,
            latest_log,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
