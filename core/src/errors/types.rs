//! Domain-specific error types for credential checks and token issuance
//!
//! These errors stay inside the service boundary. The transport only ever
//! sees the `AuthCode` each of them maps to.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No user (login) or no token record (refresh) matched
    #[error("Not registered")]
    NotRegistered,

    #[error("Invalid password")]
    InvalidPassword,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token signing failed: {reason}")]
    SigningFailed { reason: String },

    #[error("Could not generate a unique renewal token after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },

    #[error("Renewal token already held by another record")]
    RenewalTokenConflict,

    #[error("Store operation timed out: {operation}")]
    StoreTimeout { operation: String },
}
