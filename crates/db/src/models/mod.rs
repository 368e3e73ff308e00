//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Insert/update DTOs the repositories accept

pub mod category;
pub mod ticket;
pub mod ticket_log;
pub mod user;
