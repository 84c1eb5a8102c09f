//! Token repository trait defining the interface for token record persistence.

use async_trait::async_trait;

use crate::domain::entities::token::TokenRecord;
use crate::errors::DomainError;

/// Repository trait for TokenRecord persistence operations
///
/// Implementations must give read-your-writes semantics: a record returned
/// by `save` is visible to every subsequent find.
///
/// # Uniqueness
/// A non-empty renewal token may be held by at most one record. Stores
/// that can enforce this atomically (e.g. a unique index) must reject a
/// conflicting `save` with `TokenError::RenewalTokenConflict`.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Find the record currently holding a renewal token
    ///
    /// # Arguments
    /// * `renewal_token` - The renewal token value presented by a client
    ///
    /// # Returns
    /// * `Ok(Some(TokenRecord))` - Record found
    /// * `Ok(None)` - No record holds this value
    /// * `Err(DomainError)` - Store failure
    ///
    /// # Example
    /// ```no_run
    /// # use author_core::repositories::TokenRepository;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_by_renewal_token("9f86d081884c7d65...").await? {
    ///     Some(record) => println!("Token belongs to user {}", record.user_id),
    ///     None => println!("Unknown renewal token"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_renewal_token(
        &self,
        renewal_token: &str,
    ) -> Result<Option<TokenRecord>, DomainError>;

    /// Check whether any record holds a renewal token
    async fn renewal_token_exists(&self, renewal_token: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_renewal_token(renewal_token).await?.is_some())
    }

    /// Persist a record, overwriting every field
    ///
    /// A record with `id == 0` is inserted and returned with its new id;
    /// any other record replaces the stored row with the same id.
    ///
    /// # Returns
    /// * `Ok(TokenRecord)` - The stored record
    /// * `Err(DomainError)` - Save failed (including renewal token conflicts)
    async fn save(&self, record: TokenRecord) -> Result<TokenRecord, DomainError>;

    /// Replace the renewal token of a stored record, but only if it still
    /// holds `expected`
    ///
    /// The comparison and the write are one atomic step, so of two callers
    /// presenting the same renewal token at most one succeeds. Only the
    /// renewal token and its expiry are written.
    ///
    /// # Returns
    /// * `Ok(TokenRecord)` - The stored record, now holding the new value
    /// * `Err(AuthError::NotRegistered)` - The record no longer holds `expected`
    /// * `Err(DomainError)` - Save failed (including renewal token conflicts)
    async fn rotate_renewal_token(
        &self,
        record: TokenRecord,
        expected: &str,
    ) -> Result<TokenRecord, DomainError>;
}
