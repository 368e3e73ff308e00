//! HS256 bearer tokens.
//!
//! The account service signs tokens with a shared secret; this service
//! checks the signature and expiry and reads `sub` and `role` out of the
//! payload. Nothing here talks to the database.

use helpdesk_core::types::DbId;
use jsonwebtoken::errors::Error as JwtError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token payload.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Account id.
    pub sub: DbId,
    /// `"admin"` or `"user"`; anything else is rejected by the extractors.
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    /// Token id, unique per issue.
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HMAC secret.
    pub secret: String,
    /// Lifetime of tokens minted by [`generate_access_token`].
    pub access_token_expiry_mins: i64,
    /// Clock skew tolerated when checking `exp`.
    pub leeway_secs: u64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
const DEFAULT_LEEWAY_SECS: u64 = 30;

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty), `JWT_ACCESS_EXPIRY_MINS`
    /// (default 15) and `JWT_LEEWAY_SECS` (default 30).
    ///
    /// # Panics
    ///
    /// On a missing or empty secret, or an unparsable number.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        Self {
            secret,
            access_token_expiry_mins: crate::config::env_or(
                "JWT_ACCESS_EXPIRY_MINS",
                DEFAULT_ACCESS_EXPIRY_MINS,
            ),
            leeway_secs: crate::config::env_or("JWT_LEEWAY_SECS", DEFAULT_LEEWAY_SECS),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;
        validation
    }
}

/// Mint a token for `user_id` with `role`. Used by tooling and tests; in
/// production tokens come from the account service.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, JwtError> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: iat + config.access_token_expiry_mins * 60,
        iat,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry, returning the payload.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, JwtError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )
    .map(|data| data.claims)
}
