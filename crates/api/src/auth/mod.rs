//! Authentication primitives.
//!
//! Tokens are issued by the account service. This crate only validates
//! them; [`jwt::generate_access_token`] exists for tooling and tests.

pub mod jwt;
