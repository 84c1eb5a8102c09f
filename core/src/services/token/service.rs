//! Token lifecycle: login and refresh

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, error, info};

use crate::domain::entities::token::{Claims, SignedTokenState, TokenRecord};
use crate::domain::value_objects::AuthResult;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::credential::{BcryptPasswordHasher, CredentialVerifier, PasswordHasher};
use crate::services::deadline::bounded;

use super::config::TokenServiceConfig;
use super::generator::RenewalTokenGenerator;
use super::primitives::{Clock, OsRandomSource, RandomSource, SystemClock};
use super::signing::SigningKey;

/// Issues and renews session credentials
///
/// Holds no mutable state between calls: every call loads the token record
/// it needs and saves the result through the repositories. Safe to share
/// behind an `Arc` across workers.
pub struct TokenService<U: UserRepository, T: TokenRepository> {
    users: Arc<U>,
    tokens: Arc<T>,
    verifier: CredentialVerifier<U>,
    generator: RenewalTokenGenerator<T>,
    signing_key: SigningKey,
    clock: Arc<dyn Clock>,
    config: TokenServiceConfig,
}

impl<U: UserRepository, T: TokenRepository> TokenService<U, T> {
    /// Creates a token service using the wall clock, the OS random source and
    /// bcrypt password comparison
    ///
    /// # Arguments
    ///
    /// * `users` - User directory
    /// * `tokens` - Token record store
    /// * `signing_key` - Key used to sign and verify session tokens
    /// * `config` - Lifetimes, retry bound and store timeout
    pub fn new(
        users: Arc<U>,
        tokens: Arc<T>,
        signing_key: SigningKey,
        config: TokenServiceConfig,
    ) -> Self {
        let verifier = CredentialVerifier::new(
            Arc::clone(&users),
            Arc::new(BcryptPasswordHasher::default()),
            config.store_timeout,
        );
        let generator = RenewalTokenGenerator::new(
            Arc::clone(&tokens),
            Arc::new(OsRandomSource),
            config.max_generation_attempts,
            config.store_timeout,
        );

        Self {
            users,
            tokens,
            verifier,
            generator,
            signing_key,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the source of renewal token randomness
    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.generator = RenewalTokenGenerator::new(
            Arc::clone(&self.tokens),
            random,
            self.config.max_generation_attempts,
            self.config.store_timeout,
        );
        self
    }

    /// Replace the password comparison
    pub fn with_password_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.verifier =
            CredentialVerifier::new(Arc::clone(&self.users), hasher, self.config.store_timeout);
        self
    }

    /// Authenticate and hand out session credentials
    ///
    /// An unexpired signed token is returned as stored, with no write.
    /// Otherwise a new signed token is minted, the renewal token is replaced
    /// if missing or expired, and the record is saved once.
    ///
    /// Never fails: errors become the matching `AuthCode` with no token
    /// material.
    pub async fn login(&self, login_id: &str, password: &str) -> AuthResult {
        match self.try_login(login_id, password).await {
            Ok(result) => result,
            Err(e) => {
                log_failure("login", &e);
                AuthResult::failure(e.auth_code())
            }
        }
    }

    /// Exchange a renewal token for a freshly rotated one
    ///
    /// The presented token always gets replaced. The replacement only lands
    /// if the record still holds the presented value, so concurrent refreshes
    /// with one token yield a single VALID. The signed token is neither
    /// checked nor reissued; the result carries an empty signed token.
    pub async fn refresh(&self, renewal_token: &str) -> AuthResult {
        match self.try_refresh(renewal_token).await {
            Ok(result) => result,
            Err(e) => {
                log_failure("refresh", &e);
                AuthResult::failure(e.auth_code())
            }
        }
    }

    /// Decode a signed token minted by this service
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature valid and not expired at the current time
    /// * `Err(TokenError::TokenExpired)` - Expired
    /// * `Err(TokenError::InvalidToken)` - Malformed or signed with another key
    pub fn verify_signed_token(&self, token: &str) -> DomainResult<Claims> {
        self.signing_key.verify(token, self.clock.now())
    }

    async fn try_login(&self, login_id: &str, password: &str) -> DomainResult<AuthResult> {
        let (user, mut record) = self.verifier.verify(login_id, password).await?;
        let now = self.now();

        match record.signed_token_state(now) {
            SignedTokenState::Valid => {
                debug!(user_id = user.id, "Reusing unexpired signed token");
                return Ok(AuthResult::issued(&record));
            }
            state => debug!(user_id = user.id, ?state, "Minting signed token"),
        }

        let signed_expires_at = now + self.config.signed_token_lifetime;
        let signed_token = self
            .signing_key
            .sign(&Claims::for_user(&user, now, signed_expires_at))?;
        record.set_signed_token(signed_token, signed_expires_at);

        if record.renewal_token_needs_rotation(now) {
            let renewal_token = self.generator.generate().await?;
            record.set_renewal_token(renewal_token, now + self.config.renewal_token_lifetime);
            debug!(user_id = user.id, "Renewal token replaced");
        }

        let saved = self.save(record).await?;
        info!(user_id = user.id, "Login issued new signed token");
        Ok(AuthResult::issued(&saved))
    }

    async fn try_refresh(&self, renewal_token: &str) -> DomainResult<AuthResult> {
        if renewal_token.is_empty() {
            return Err(AuthError::NotRegistered.into());
        }

        let found = bounded(
            self.config.store_timeout,
            "find_token_by_renewal_token",
            self.tokens.find_by_renewal_token(renewal_token),
        )
        .await?;

        let Some(mut record) = found else {
            info!(token = token_prefix(renewal_token), "Refresh with unknown renewal token");
            return Err(AuthError::NotRegistered.into());
        };

        let now = self.now();
        let rotated = self.generator.generate().await?;
        record.set_renewal_token(rotated, now + self.config.renewal_token_lifetime);

        let saved = bounded(
            self.config.store_timeout,
            "rotate_renewal_token",
            self.tokens.rotate_renewal_token(record, renewal_token),
        )
        .await?;
        info!(user_id = saved.user_id, "Renewal token rotated");
        Ok(AuthResult::renewed(&saved))
    }

    async fn save(&self, record: TokenRecord) -> DomainResult<TokenRecord> {
        bounded(
            self.config.store_timeout,
            "save_token_record",
            self.tokens.save(record),
        )
        .await
    }

    /// Current time at whole-second precision, so values read back from
    /// the store compare equal to the ones returned at issue time
    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(0)
    }
}

fn log_failure(operation: &'static str, e: &DomainError) {
    match e {
        DomainError::Auth(reason) => debug!(operation, reason = %reason, "Request rejected"),
        other => error!(operation, error = %other, "Request failed"),
    }
}

/// First characters of a renewal token, enough to correlate log lines
fn token_prefix(token: &str) -> &str {
    token.get(..8).unwrap_or(token)
}
