//! Token entities for session issuance and renewal.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// Signed token expiration time (15 minutes)
pub const SIGNED_TOKEN_EXPIRY_SECONDS: i64 = 900;

/// Renewal token expiration time (7 days)
pub const RENEWAL_TOKEN_EXPIRY_SECONDS: i64 = 604_800;

/// Random bytes behind each renewal token
pub const RENEWAL_TOKEN_BYTES: usize = 32;

/// Hex length of a renewal token
pub const RENEWAL_TOKEN_LENGTH: usize = RENEWAL_TOKEN_BYTES * 2;

/// Claims structure for the signed token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Login identifier of the holder
    pub login_id: String,

    /// Email of the holder
    pub email: String,

    /// Display name of the holder
    pub username: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for `user`, valid from `issued_at` until `expires_at`
    pub fn for_user(user: &User, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            login_id: user.login_id.clone(),
            email: user.email.clone(),
            username: user.name.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Expiry as a timestamp, `None` if `exp` is out of range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Where a record's signed token stands at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignedTokenState {
    /// Nothing has ever been issued for this user
    NoToken,
    /// A signed token exists and expires in the future
    Valid,
    /// A signed token exists but its expiry is absent or not in the future
    Expired,
}

/// Per-user token record
///
/// One record per user, created on the first successful login and
/// overwritten in place afterwards. An `id` of zero means the record has
/// never been persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Row identifier, zero until first saved
    pub id: u64,

    /// Owning user
    pub user_id: u64,

    /// Current signed token, empty when none was issued
    pub signed_token: String,

    /// Signed token expiry
    pub signed_token_expires_at: Option<DateTime<Utc>>,

    /// Current renewal token, empty when none was issued
    pub renewal_token: String,

    /// Renewal token expiry
    pub renewal_token_expires_at: Option<DateTime<Utc>>,
}

impl TokenRecord {
    /// Creates an empty, unsaved record for a user
    pub fn for_user(user_id: u64) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    /// Whether this record exists in the store
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Classifies the signed token at `now`
    pub fn signed_token_state(&self, now: DateTime<Utc>) -> SignedTokenState {
        if !self.is_persisted() || self.signed_token.is_empty() {
            return SignedTokenState::NoToken;
        }
        match self.signed_token_expires_at {
            Some(expires_at) if expires_at > now => SignedTokenState::Valid,
            _ => SignedTokenState::Expired,
        }
    }

    /// A renewal token must be replaced when missing, without expiry, or
    /// past its expiry. One expiring exactly at `now` is still kept.
    pub fn renewal_token_needs_rotation(&self, now: DateTime<Utc>) -> bool {
        if self.renewal_token.is_empty() {
            return true;
        }
        match self.renewal_token_expires_at {
            Some(expires_at) => expires_at < now,
            None => true,
        }
    }

    /// Replaces the signed token and its expiry
    pub fn set_signed_token(&mut self, token: String, expires_at: DateTime<Utc>) {
        self.signed_token = token;
        self.signed_token_expires_at = Some(expires_at);
    }

    /// Replaces the renewal token and its expiry
    pub fn set_renewal_token(&mut self, token: String, expires_at: DateTime<Utc>) {
        self.renewal_token = token;
        self.renewal_token_expires_at = Some(expires_at);
    }
}

#[cfg(test)]
#[path = "tests/token_tests.rs"]
mod tests;
