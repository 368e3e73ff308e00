//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&mut PgConnection` as the first argument. Pass a pooled connection for
//! single statements, or a transaction when several writes must land
//! together.

pub mod category_repo;
pub mod ticket_log_repo;
pub mod ticket_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use ticket_log_repo::TicketLogRepo;
pub use ticket_repo::TicketRepo;
pub use user_repo::UserRepo;
