//! Domain building blocks shared by the repository and HTTP layers.
//!
//! This crate performs no I/O. It holds the error vocabulary, primitive
//! type aliases, role names, the ticket status vocabulary and the
//! pagination clamps.

pub mod error;
pub mod pagination;
pub mod roles;
pub mod ticket;
pub mod types;
