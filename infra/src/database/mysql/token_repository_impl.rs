//! MySQL implementation of the TokenRepository trait.
//!
//! Renewal tokens are stored as issued and looked up by value. The
//! `refresh_token` column is NULL while a record holds no renewal token, so
//! the unique index only covers issued values.
//!
//! Two first logins for one user can both try to insert. The loser of the
//! `user_id` unique index falls back to updating the winner's row, the same
//! last-writer-wins outcome as two concurrent updates.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use author_core::domain::entities::token::TokenRecord;
use author_core::errors::{AuthError, DomainError, TokenError};
use author_core::repositories::TokenRepository;

use super::{row_to_token_record, storage_error, TokenIndex};

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn non_empty(value: &str) -> Option<&str> {
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Unique index a failed write collided with, if any
    fn violated_index(e: &sqlx::Error) -> Option<TokenIndex> {
        match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                TokenIndex::from_duplicate_message(db.message())
            }
            _ => None,
        }
    }

    /// Duplicate key errors on the renewal token index become a conflict;
    /// everything else is a storage failure
    fn save_error(e: sqlx::Error) -> DomainError {
        if Self::violated_index(&e) == Some(TokenIndex::RefreshToken) {
            tracing::warn!("Renewal token already held by another record");
            return TokenError::RenewalTokenConflict.into();
        }
        storage_error("Token record save failed", e)
    }

    async fn insert(&self, record: TokenRecord) -> Result<TokenRecord, DomainError> {
        let query = r#"
            INSERT INTO user_tokens
                (user_id, jwt, jwt_expired_at, refresh_token, refresh_token_expired_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(record.user_id)
            .bind(&record.signed_token)
            .bind(record.signed_token_expires_at)
            .bind(Self::non_empty(&record.renewal_token))
            .bind(record.renewal_token_expires_at)
            .execute(&self.pool)
            .await;

        let result = match result {
            Ok(result) => result,
            Err(e) if Self::violated_index(&e) == Some(TokenIndex::UserId) => {
                tracing::debug!(
                    user_id = record.user_id,
                    "Token record already inserted, updating it"
                );
                return self.update_existing(record).await;
            }
            Err(e) => return Err(Self::save_error(e)),
        };

        tracing::debug!(user_id = record.user_id, "Token record inserted");

        Ok(TokenRecord {
            id: result.last_insert_id(),
            ..record
        })
    }

    /// Writes an unsaved record over the row another writer created for
    /// the same user
    async fn update_existing(&self, record: TokenRecord) -> Result<TokenRecord, DomainError> {
        let id: Option<u64> = sqlx::query_scalar("SELECT id FROM user_tokens WHERE user_id = ?")
            .bind(record.user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Token record lookup failed", e))?;

        let Some(id) = id else {
            return Err(DomainError::NotFound {
                resource: format!("token record for user {}", record.user_id),
            });
        };

        self.update(TokenRecord { id, ..record }).await
    }

    async fn update(&self, record: TokenRecord) -> Result<TokenRecord, DomainError> {
        let query = r#"
            UPDATE user_tokens
            SET user_id = ?, jwt = ?, jwt_expired_at = ?,
                refresh_token = ?, refresh_token_expired_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(record.user_id)
            .bind(&record.signed_token)
            .bind(record.signed_token_expires_at)
            .bind(Self::non_empty(&record.renewal_token))
            .bind(record.renewal_token_expires_at)
            .bind(record.id)
            .execute(&self.pool)
            .await
            .map_err(Self::save_error)?;

        // MySQL reports zero affected rows when nothing changed, so only a
        // missing row is an error
        if result.rows_affected() == 0 && !self.exists(record.id).await? {
            return Err(DomainError::NotFound {
                resource: format!("token record {}", record.id),
            });
        }

        tracing::debug!(user_id = record.user_id, "Token record updated");
        Ok(record)
    }

    async fn exists(&self, id: u64) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM user_tokens WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Token record lookup failed", e))?;

        let count: i64 = row.try_get("count").map_err(|e| DomainError::Internal {
            message: format!("Failed to get count: {}", e),
        })?;
        Ok(count > 0)
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn find_by_renewal_token(
        &self,
        renewal_token: &str,
    ) -> Result<Option<TokenRecord>, DomainError> {
        if renewal_token.is_empty() {
            return Ok(None);
        }

        let query = r#"
            SELECT id AS token_id, user_id, jwt, jwt_expired_at,
                   refresh_token, refresh_token_expired_at
            FROM user_tokens
            WHERE refresh_token = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(renewal_token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Renewal token lookup failed", e))?;

        match row {
            Some(row) => {
                let user_id: u64 = row.try_get("user_id").map_err(|e| DomainError::Internal {
                    message: format!("Failed to get user_id: {}", e),
                })?;
                Ok(Some(row_to_token_record(&row, user_id)?))
            }
            None => Ok(None),
        }
    }

    async fn renewal_token_exists(&self, renewal_token: &str) -> Result<bool, DomainError> {
        if renewal_token.is_empty() {
            return Ok(false);
        }

        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM user_tokens WHERE refresh_token = ?",
        )
        .bind(renewal_token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("Renewal token existence check failed", e))?;

        let count: i64 = row.try_get("count").map_err(|e| DomainError::Internal {
            message: format!("Failed to get count: {}", e),
        })?;
        Ok(count > 0)
    }

    async fn save(&self, record: TokenRecord) -> Result<TokenRecord, DomainError> {
        if record.is_persisted() {
            self.update(record).await
        } else {
            self.insert(record).await
        }
    }

    async fn rotate_renewal_token(
        &self,
        record: TokenRecord,
        expected: &str,
    ) -> Result<TokenRecord, DomainError> {
        if expected.is_empty() {
            return Err(AuthError::NotRegistered.into());
        }

        let query = r#"
            UPDATE user_tokens
            SET refresh_token = ?, refresh_token_expired_at = ?
            WHERE id = ? AND refresh_token = ?
        "#;

        let result = sqlx::query(query)
            .bind(Self::non_empty(&record.renewal_token))
            .bind(record.renewal_token_expires_at)
            .bind(record.id)
            .bind(expected)
            .execute(&self.pool)
            .await
            .map_err(Self::save_error)?;

        // The new value always differs from `expected`, so zero rows means
        // another writer already replaced it
        if result.rows_affected() == 0 {
            tracing::debug!(user_id = record.user_id, "Renewal token already rotated");
            return Err(AuthError::NotRegistered.into());
        }

        tracing::debug!(user_id = record.user_id, "Renewal token rotated");
        Ok(record)
    }
}
