//! MySQL repository implementations

mod token_repository_impl;
mod user_repository_impl;

pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::Row;

use author_core::domain::entities::token::TokenRecord;
use author_core::errors::DomainError;

/// Name of the unique index guarding renewal token values
pub(crate) const REFRESH_TOKEN_INDEX: &str = "uq_user_tokens_refresh_token";

/// Name of the unique index allowing one token record per user
pub(crate) const USER_ID_INDEX: &str = "uq_user_tokens_user_id";

/// Unique index on `user_tokens` a write collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenIndex {
    UserId,
    RefreshToken,
}

impl TokenIndex {
    /// Reads the index name out of a duplicate key message such as
    /// `Duplicate entry '7' for key 'user_tokens.uq_user_tokens_user_id'`
    pub(crate) fn from_duplicate_message(message: &str) -> Option<Self> {
        if message.contains(REFRESH_TOKEN_INDEX) {
            Some(Self::RefreshToken)
        } else if message.contains(USER_ID_INDEX) {
            Some(Self::UserId)
        } else {
            None
        }
    }
}

pub(crate) fn storage_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "{}", context);
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

/// Maps `user_tokens` columns (possibly NULL from an outer join) into a
/// record. A missing row yields an unsaved record for `user_id`.
pub(crate) fn row_to_token_record(row: &MySqlRow, user_id: u64) -> Result<TokenRecord, DomainError> {
    let column = |name: &str, e: sqlx::Error| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    };

    let id: Option<u64> = row.try_get("token_id").map_err(|e| column("token_id", e))?;
    let Some(id) = id else {
        return Ok(TokenRecord::for_user(user_id));
    };

    let signed_token: Option<String> = row.try_get("jwt").map_err(|e| column("jwt", e))?;
    let signed_token_expires_at: Option<DateTime<Utc>> = row
        .try_get("jwt_expired_at")
        .map_err(|e| column("jwt_expired_at", e))?;
    let renewal_token: Option<String> = row
        .try_get("refresh_token")
        .map_err(|e| column("refresh_token", e))?;
    let renewal_token_expires_at: Option<DateTime<Utc>> = row
        .try_get("refresh_token_expired_at")
        .map_err(|e| column("refresh_token_expired_at", e))?;

    Ok(TokenRecord {
        id,
        user_id,
        signed_token: signed_token.unwrap_or_default(),
        signed_token_expires_at,
        renewal_token: renewal_token.unwrap_or_default(),
        renewal_token_expires_at,
    })
}
