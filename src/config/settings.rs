//! Application settings loaded from environment variables.

use std::env;

use super::constants::{DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Token signing secret. Optional at load time: its absence only
    /// surfaces when a token is issued or verified.
    jwt_secret: Option<String>,
    pub jwt_expiration_hours: i64,
    /// Local development flag. When set, the auth cookie carries no
    /// Domain attribute so it sticks to localhost.
    pub local: bool,
    cookie_domain: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("local", &self.local)
            .field("cookie_domain", &self.cookie_domain)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Secrets are not validated here. Each is checked by the one
    /// collaborator that needs it, at the moment it is used.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let local = env::var("LOCAL")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret: env::var("JWT_SECRET").ok(),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            local,
            cookie_domain: env::var("COOKIE_DOMAIN").ok(),
        }
    }

    /// Construct a config directly (tests and embedding).
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Scope the auth cookie to a domain. Implies non-local mode.
    pub fn with_cookie_domain(mut self, domain: impl Into<String>) -> Self {
        self.local = false;
        self.cookie_domain = Some(domain.into());
        self
    }

    /// Baseline configuration for tests: local mode, no signing secret,
    /// independent of the process environment.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn test_default() -> Self {
        Self {
            database_url: "postgres://localhost/test".to_string(),
            jwt_secret: None,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            local: true,
            cookie_domain: None,
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    ///
    /// # Errors
    /// Returns [`AppError::MissingTokenSecret`] when no secret is configured.
    pub fn jwt_secret_bytes(&self) -> AppResult<&[u8]> {
        self.jwt_secret
            .as_deref()
            .map(str::as_bytes)
            .ok_or(AppError::MissingTokenSecret)
    }

    /// Domain attribute for the auth cookie. None in local mode.
    pub fn cookie_domain(&self) -> Option<&str> {
        if self.local {
            None
        } else {
            self.cookie_domain.as_deref()
        }
    }
}
