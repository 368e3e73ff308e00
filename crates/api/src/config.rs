use std::fmt::Display;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Server configuration, read once at boot.
///
/// | Env Var                 | Default                 |
/// |-------------------------|-------------------------|
/// | `HOST`                  | `0.0.0.0`               |
/// | `PORT`                  | `3000`                  |
/// | `CORS_ORIGINS`          | `http://localhost:5173` |
/// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
/// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
/// | `DB_MAX_CONNECTIONS`    | `20`                    |
///
/// JWT settings are documented on [`JwtConfig::from_env`]. `DATABASE_URL`,
/// `RUST_LOG` and `LOG_FORMAT` are read directly by `main`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in the environment.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// How long to wait for the pool to close after the listener stops.
    pub shutdown_timeout_secs: u64,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// # Panics
    ///
    /// On any value that does not parse, or a missing `JWT_SECRET`.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins: parse_origins(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
            ),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            db_max_connections: env_or(
                "DB_MAX_CONNECTIONS",
                helpdesk_db::DEFAULT_MAX_CONNECTIONS,
            ),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Parse `key` from the environment, falling back to `default` when unset.
///
/// Panics when the variable is set but does not parse.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
