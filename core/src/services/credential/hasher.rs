//! Password hash comparison

use crate::errors::{DomainError, DomainResult};

/// Compares plaintext passwords against stored hashes
///
/// Implementations must compare in time independent of where the inputs
/// differ. Calls are CPU-bound and run on the blocking thread pool.
pub trait PasswordHasher: Send + Sync {
    /// `Ok(true)` when `plaintext` matches `hash`, `Ok(false)` on mismatch,
    /// `Err` when `hash` is not a valid hash
    fn verify(&self, hash: &str, plaintext: &str) -> DomainResult<bool>;

    /// Hash a plaintext password for storage
    fn hash(&self, plaintext: &str) -> DomainResult<String>;
}

/// bcrypt-backed password hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn verify(&self, hash: &str, plaintext: &str) -> DomainResult<bool> {
        bcrypt::verify(plaintext, hash).map_err(|e| DomainError::Internal {
            message: format!("Stored password hash is unusable: {}", e),
        })
    }

    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }
}
