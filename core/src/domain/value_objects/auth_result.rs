//! Authentication result value object returned by login and refresh.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenRecord;

/// Outcome code reported to the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthCode {
    Valid,
    NotRegistered,
    InvalidPassword,
    InternalError,
}

impl AuthCode {
    /// Wire name of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthCode::Valid => "VALID",
            AuthCode::NotRegistered => "NOT_REGISTERED",
            AuthCode::InvalidPassword => "INVALID_PASSWORD",
            AuthCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for AuthCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a login or refresh call
///
/// Token fields are empty and expiries `None` unless `code` is `Valid`.
/// A successful refresh carries only the renewal token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    pub code: AuthCode,
    pub signed_token: String,
    pub renewal_token: String,
    pub signed_token_expires_at: Option<DateTime<Utc>>,
    pub renewal_token_expires_at: Option<DateTime<Utc>>,
}

impl AuthResult {
    /// Successful login: both tokens from the record
    pub fn issued(record: &TokenRecord) -> Self {
        Self {
            code: AuthCode::Valid,
            signed_token: record.signed_token.clone(),
            renewal_token: record.renewal_token.clone(),
            signed_token_expires_at: record.signed_token_expires_at,
            renewal_token_expires_at: record.renewal_token_expires_at,
        }
    }

    /// Successful refresh: the rotated renewal token only
    pub fn renewed(record: &TokenRecord) -> Self {
        Self {
            code: AuthCode::Valid,
            signed_token: String::new(),
            renewal_token: record.renewal_token.clone(),
            signed_token_expires_at: None,
            renewal_token_expires_at: record.renewal_token_expires_at,
        }
    }

    /// Failure with no token material
    pub fn failure(code: AuthCode) -> Self {
        Self {
            code,
            signed_token: String::new(),
            renewal_token: String::new(),
            signed_token_expires_at: None,
            renewal_token_expires_at: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.code == AuthCode::Valid
    }
}
