//! In-memory repositories and app wiring shared by the route tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use author_api::app::AppState;
use author_core::domain::entities::{TokenRecord, User};
use author_core::errors::{AuthError, DomainError};
use author_core::repositories::{TokenRepository, UserRepository};
use author_core::services::{FixedClock, SigningKey, TokenService, TokenServiceConfig};

#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<Vec<User>>>,
    tokens: Arc<Mutex<HashMap<u64, TokenRecord>>>,
    next_id: Arc<AtomicU64>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn with_user(self, login_id: &str, password: &str) -> Self {
        let id = self.users.lock().unwrap().len() as u64 + 1;
        let hash = bcrypt::hash(password, 4).unwrap();
        self.users.lock().unwrap().push(User::new(
            id,
            login_id,
            login_id.to_uppercase(),
            format!("{}@example.com", login_id),
            hash,
        ));
        self
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn token_count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "store offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_with_token_by_login_id(
        &self,
        login_id: &str,
    ) -> Result<Option<(User, TokenRecord)>, DomainError> {
        self.check()?;
        let user = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.login_id == login_id)
            .cloned();

        Ok(user.map(|user| {
            let record = self
                .tokens
                .lock()
                .unwrap()
                .get(&user.id)
                .cloned()
                .unwrap_or_else(|| TokenRecord::for_user(user.id));
            (user, record)
        }))
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn find_by_renewal_token(
        &self,
        renewal_token: &str,
    ) -> Result<Option<TokenRecord>, DomainError> {
        self.check()?;
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .values()
            .find(|r| !r.renewal_token.is_empty() && r.renewal_token == renewal_token)
            .cloned())
    }

    async fn save(&self, mut record: TokenRecord) -> Result<TokenRecord, DomainError> {
        self.check()?;
        if record.id == 0 {
            record.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        }
        self.tokens
            .lock()
            .unwrap()
            .insert(record.user_id, record.clone());
        Ok(record)
    }

    async fn rotate_renewal_token(
        &self,
        record: TokenRecord,
        expected: &str,
    ) -> Result<TokenRecord, DomainError> {
        self.check()?;
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.get_mut(&record.user_id) {
            Some(stored) if !expected.is_empty() && stored.renewal_token == expected => {
                stored.renewal_token = record.renewal_token;
                stored.renewal_token_expires_at = record.renewal_token_expires_at;
                Ok(stored.clone())
            }
            _ => Err(AuthError::NotRegistered.into()),
        }
    }
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
}

pub type TestState = AppState<MemoryStore, MemoryStore>;

/// App state over `store` with the clock pinned at `now()`
pub fn state(store: &MemoryStore) -> web::Data<TestState> {
    let service = TokenService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        SigningKey::from_secret(b"route-test-secret").unwrap(),
        TokenServiceConfig::default(),
    )
    .with_clock(Arc::new(FixedClock::new(now())));

    web::Data::new(AppState::new(Arc::new(service)))
}
