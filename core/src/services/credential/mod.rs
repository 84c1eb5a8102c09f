//! Credential verification module
//!
//! Looks a user up by login identifier and checks the presented password
//! against the stored bcrypt hash.

mod hasher;
mod verifier;


pub use hasher::{BcryptPasswordHasher, PasswordHasher};
pub use verifier::CredentialVerifier;
