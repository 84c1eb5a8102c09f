//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::TokenRecord;
use crate::errors::{AuthError, DomainError, TokenError};

use super::r#trait::TokenRepository;

/// In-memory token store keyed by user id
///
/// Clones share state, so a `MockUserRepository` built on a clone sees
/// every save made through this handle.
#[derive(Clone, Default)]
pub struct MockTokenRepository {
    records: Arc<RwLock<HashMap<u64, TokenRecord>>>,
    next_id: Arc<AtomicU64>,
    saves: Arc<AtomicUsize>,
    lookups: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
    fail_lookups: Arc<AtomicBool>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record directly, bypassing the save counter
    pub async fn insert(&self, mut record: TokenRecord) -> TokenRecord {
        if record.id == 0 {
            record.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        }
        self.records.write().await.insert(record.user_id, record.clone());
        record
    }

    pub async fn record_for_user(&self, user_id: u64) -> Option<TokenRecord> {
        self.records.read().await.get(&user_id).cloned()
    }

    pub async fn all_records(&self) -> Vec<TokenRecord> {
        self.records.read().await.values().cloned().collect()
    }

    /// Number of calls to `save` and `rotate_renewal_token`, successful or not
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of renewal token lookups and existence checks
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn find_by_renewal_token(
        &self,
        renewal_token: &str,
    ) -> Result<Option<TokenRecord>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "mock lookup failure".to_string(),
            });
        }

        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| !r.renewal_token.is_empty() && r.renewal_token == renewal_token)
            .cloned())
    }

    async fn save(&self, mut record: TokenRecord) -> Result<TokenRecord, DomainError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "mock save failure".to_string(),
            });
        }

        let mut records = self.records.write().await;
        ensure_unique(&records, &record)?;

        if record.id == 0 {
            record.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        }
        records.insert(record.user_id, record.clone());
        Ok(record)
    }

    async fn rotate_renewal_token(
        &self,
        record: TokenRecord,
        expected: &str,
    ) -> Result<TokenRecord, DomainError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "mock save failure".to_string(),
            });
        }

        let mut records = self.records.write().await;
        let holds_expected = records.get(&record.user_id).is_some_and(|r| {
            r.id == record.id && !expected.is_empty() && r.renewal_token == expected
        });
        if !holds_expected {
            return Err(AuthError::NotRegistered.into());
        }
        ensure_unique(&records, &record)?;

        let Some(stored) = records.get_mut(&record.user_id) else {
            return Err(AuthError::NotRegistered.into());
        };
        stored.renewal_token = record.renewal_token;
        stored.renewal_token_expires_at = record.renewal_token_expires_at;
        Ok(stored.clone())
    }
}

/// Mirror the unique index on the renewal token column
fn ensure_unique(
    records: &HashMap<u64, TokenRecord>,
    record: &TokenRecord,
) -> Result<(), DomainError> {
    if !record.renewal_token.is_empty()
        && records
            .values()
            .any(|r| r.user_id != record.user_id && r.renewal_token == record.renewal_token)
    {
        return Err(TokenError::RenewalTokenConflict.into());
    }
    Ok(())
}
