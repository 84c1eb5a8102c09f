//! Business services containing domain logic and use cases.

pub mod credential;
pub mod token;

mod deadline;

// Re-export commonly used types
pub use credential::{BcryptPasswordHasher, CredentialVerifier, PasswordHasher};
pub use token::{
    Clock, FixedClock, OsRandomSource, RandomSource, RenewalTokenGenerator, SigningKey,
    SystemClock, TokenService, TokenServiceConfig,
};
