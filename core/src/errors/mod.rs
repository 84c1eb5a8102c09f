//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use thiserror::Error;

use crate::domain::value_objects::AuthCode;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// The opaque result code reported to the transport for this error.
    ///
    /// Only the two credential outcomes are distinguishable by callers;
    /// every storage, signing or generation failure collapses into
    /// `InternalError`.
    pub fn auth_code(&self) -> AuthCode {
        match self {
            DomainError::Auth(AuthError::NotRegistered) => AuthCode::NotRegistered,
            DomainError::Auth(AuthError::InvalidPassword) => AuthCode::InvalidPassword,
            _ => AuthCode::InternalError,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
