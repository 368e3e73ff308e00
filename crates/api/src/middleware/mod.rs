//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated account from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireUser`] -- Requires the `user` role.
//! - [`rbac::Caller`] -- Accepts an admin or an end user and says which.

pub mod auth;
pub mod rbac;
