//! Request handlers for the ticketing endpoints.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers authorize the caller, open a connection or transaction on the
//! shared pool, delegate to the repositories in `helpdesk_db`, and shape
//! the result through [`crate::views`].

pub mod categories;
pub mod ticket_logs;
pub mod tickets;
