//! Authentication and token issuance configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Secret shipped for local development only
pub const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing and token lifetime configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used to sign session tokens (HS256)
    pub secret: String,

    /// Signed token lifetime in seconds
    pub access_token_expiry: i64,

    /// Renewal token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// Upper bound for a single store call in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    /// How many renewal token candidates to try before giving up
    #[serde(default = "default_max_generation_attempts")]
    pub max_generation_attempts: u32,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            store_timeout_ms: default_store_timeout_ms(),
            max_generation_attempts: default_max_generation_attempts(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        Self {
            jwt: JwtConfig {
                secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
                access_token_expiry: env_or("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry),
                refresh_token_expiry: env_or("JWT_REFRESH_TOKEN_EXPIRY", defaults.refresh_token_expiry),
                store_timeout_ms: env_or("AUTH_STORE_TIMEOUT_MS", defaults.store_timeout_ms),
                max_generation_attempts: env_or(
                    "AUTH_MAX_GENERATION_ATTEMPTS",
                    defaults.max_generation_attempts,
                ),
            },
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }
}

fn default_store_timeout_ms() -> u64 {
    5000
}

fn default_max_generation_attempts() -> u32 {
    8
}
