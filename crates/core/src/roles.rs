//! Well-known role name constants.
//!
//! Tokens are issued by the account service; these must match the `role`
//! claim it emits.

/// Support staff. Sees every ticket and every log author.
pub const ROLE_ADMIN: &str = "admin";
/// End user. Files tickets and only ever sees their own.
pub const ROLE_USER: &str = "user";
