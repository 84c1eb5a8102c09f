//! Renewal token generation

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::domain::entities::token::RENEWAL_TOKEN_BYTES;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenRepository;
use crate::services::deadline::bounded;

use super::primitives::RandomSource;

/// Produces renewal tokens no stored record currently holds
///
/// Each candidate is 32 random bytes, hex encoded. Candidates already in
/// the store are discarded; after `max_attempts` collisions generation
/// fails with `TokenError::GenerationExhausted`.
///
/// The existence check and the later save are separate store calls, so
/// two concurrent callers can both see the same candidate as free. The
/// store's unique index on the renewal token rejects the second save.
pub struct RenewalTokenGenerator<T: TokenRepository> {
    tokens: Arc<T>,
    random: Arc<dyn RandomSource>,
    max_attempts: u32,
    store_timeout: Duration,
}

impl<T: TokenRepository> RenewalTokenGenerator<T> {
    pub fn new(
        tokens: Arc<T>,
        random: Arc<dyn RandomSource>,
        max_attempts: u32,
        store_timeout: Duration,
    ) -> Self {
        Self {
            tokens,
            random,
            max_attempts,
            store_timeout,
        }
    }

    /// Generate a renewal token not held by any record
    pub async fn generate(&self) -> DomainResult<String> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.candidate().await?;

            let taken = bounded(
                self.store_timeout,
                "renewal_token_exists",
                self.tokens.renewal_token_exists(&candidate),
            )
            .await?;

            if !taken {
                debug!(attempt, "Renewal token generated");
                return Ok(candidate);
            }

            warn!(attempt, max_attempts = self.max_attempts, "Renewal token collision, regenerating");
        }

        error!(attempts = self.max_attempts, "Renewal token generation exhausted");
        Err(TokenError::GenerationExhausted {
            attempts: self.max_attempts,
        }
        .into())
    }

    async fn candidate(&self) -> DomainResult<String> {
        let random = Arc::clone(&self.random);

        let read = async move {
            tokio::task::spawn_blocking(move || {
                let mut bytes = [0u8; RENEWAL_TOKEN_BYTES];
                random.fill_bytes(&mut bytes).map(|_| bytes)
            })
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Random read task failed: {}", e),
            })?
        };

        let bytes = bounded(self.store_timeout, "read_random_bytes", read).await?;
        Ok(hex::encode(bytes))
    }
}
