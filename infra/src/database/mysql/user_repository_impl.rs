//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use author_core::domain::entities::token::TokenRecord;
use author_core::domain::entities::user::User;
use author_core::errors::DomainError;
use author_core::repositories::UserRepository;

use super::{row_to_token_record, storage_error};

/// MySQL implementation of UserRepository
///
/// Reads `users` joined with `user_tokens`; never writes.
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let get = |name: &str| -> Result<String, DomainError> {
            row.try_get(name).map_err(|e| DomainError::Internal {
                message: format!("Failed to get {}: {}", name, e),
            })
        };

        let id: u64 = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(User::new(
            id,
            get("login_id")?,
            get("name")?,
            get("email")?,
            get("password")?,
        ))
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_with_token_by_login_id(
        &self,
        login_id: &str,
    ) -> Result<Option<(User, TokenRecord)>, DomainError> {
        let query = r#"
            SELECT u.id, u.login_id, u.name, u.email, u.password,
                   t.id AS token_id, t.jwt, t.jwt_expired_at,
                   t.refresh_token, t.refresh_token_expired_at
            FROM users u
            LEFT JOIN user_tokens t ON t.user_id = u.id
            WHERE u.login_id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(login_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("User lookup failed", e))?;

        match row {
            Some(row) => {
                let user = Self::row_to_user(&row)?;
                let record = row_to_token_record(&row, user.id)?;
                Ok(Some((user, record)))
            }
            None => Ok(None),
        }
    }
}
