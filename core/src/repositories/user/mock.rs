//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::entities::token::TokenRecord;
use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::token::MockTokenRepository;

use super::trait_::UserRepository;

/// Mock user directory joined against a `MockTokenRepository`
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
    tokens: MockTokenRepository,
    fail_lookups: AtomicBool,
}

impl MockUserRepository {
    /// Create a directory whose token records live in `tokens`
    pub fn new(tokens: MockTokenRepository) -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            tokens,
            fail_lookups: AtomicBool::new(false),
        }
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().push(user);
        self
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_with_token_by_login_id(
        &self,
        login_id: &str,
    ) -> Result<Option<(User, TokenRecord)>, DomainError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "mock directory failure".to_string(),
            });
        }

        let user = {
            let users = self.users.lock().unwrap();
            users.iter().find(|u| u.login_id == login_id).cloned()
        };

        match user {
            Some(user) => {
                let record = self
                    .tokens
                    .record_for_user(user.id)
                    .await
                    .unwrap_or_else(|| TokenRecord::for_user(user.id));
                Ok(Some((user, record)))
            }
            None => Ok(None),
        }
    }
}
