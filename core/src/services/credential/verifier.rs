//! Credential verification against the user directory

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::domain::entities::token::TokenRecord;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::deadline::bounded;

use super::hasher::PasswordHasher;

/// Checks a login identifier and password against the stored hash
///
/// Never writes: on success it hands back the user and its current token
/// record for the caller to act on.
pub struct CredentialVerifier<U: UserRepository> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    store_timeout: Duration,
}

impl<U: UserRepository> CredentialVerifier<U> {
    pub fn new(users: Arc<U>, hasher: Arc<dyn PasswordHasher>, store_timeout: Duration) -> Self {
        Self {
            users,
            hasher,
            store_timeout,
        }
    }

    /// Verify credentials
    ///
    /// # Returns
    ///
    /// * `Ok((User, TokenRecord))` - Password matches
    /// * `Err(AuthError::NotRegistered)` - Unknown login identifier
    /// * `Err(AuthError::InvalidPassword)` - Password mismatch
    /// * `Err(DomainError)` - Lookup failure, timeout or unusable hash
    pub async fn verify(&self, login_id: &str, password: &str) -> DomainResult<(User, TokenRecord)> {
        let found = bounded(
            self.store_timeout,
            "find_user_and_token_by_login_id",
            self.users.find_with_token_by_login_id(login_id),
        )
        .await?;

        let Some((user, record)) = found else {
            info!(login_id, "Login for unknown user");
            return Err(AuthError::NotRegistered.into());
        };

        if self.password_matches(&user, password).await? {
            debug!(user_id = user.id, "Credentials verified");
            Ok((user, record))
        } else {
            debug!(user_id = user.id, "Password mismatch");
            Err(AuthError::InvalidPassword.into())
        }
    }

    async fn password_matches(&self, user: &User, password: &str) -> DomainResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let hash = user.password_hash.clone();
        let plaintext = password.to_string();

        let outcome = tokio::task::spawn_blocking(move || hasher.verify(&hash, &plaintext))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password check task failed: {}", e),
            })
            .and_then(|result| result);

        outcome.map_err(|e| {
            error!(user_id = user.id, error = %e, "Password comparison failed");
            e
        })
    }
}
