//! # Author Core
//!
//! Core business logic for the authentication service: domain entities,
//! repository interfaces, the error taxonomy and the token issuance and
//! renewal engine.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, SignedTokenState, TokenRecord, User};
pub use domain::value_objects::{AuthCode, AuthResult};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{TokenRepository, UserRepository};
pub use services::{
    BcryptPasswordHasher, Clock, FixedClock, OsRandomSource, PasswordHasher, RandomSource,
    SigningKey, SystemClock, TokenService, TokenServiceConfig,
};
