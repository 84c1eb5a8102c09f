//! Configuration for the token service

use std::time::Duration as StdDuration;

use chrono::Duration;

use author_shared::config::JwtConfig;

use crate::domain::entities::token::{RENEWAL_TOKEN_EXPIRY_SECONDS, SIGNED_TOKEN_EXPIRY_SECONDS};

/// Default bound for a single store call
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

/// Default number of renewal token candidates tried before giving up
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 8;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Lifetime of a minted signed token
    pub signed_token_lifetime: Duration,
    /// Lifetime of a minted renewal token
    pub renewal_token_lifetime: Duration,
    /// Renewal token candidates tried before failing
    pub max_generation_attempts: u32,
    /// Bound applied to every store call and random read
    pub store_timeout: StdDuration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            signed_token_lifetime: Duration::seconds(SIGNED_TOKEN_EXPIRY_SECONDS),
            renewal_token_lifetime: Duration::seconds(RENEWAL_TOKEN_EXPIRY_SECONDS),
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            store_timeout: StdDuration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            signed_token_lifetime: Duration::seconds(jwt.access_token_expiry),
            renewal_token_lifetime: Duration::seconds(jwt.refresh_token_expiry),
            max_generation_attempts: jwt.max_generation_attempts.max(1),
            store_timeout: StdDuration::from_millis(jwt.store_timeout_ms),
        }
    }
}
