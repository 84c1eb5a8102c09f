//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{
    Claims, SignedTokenState, TokenRecord,
    RENEWAL_TOKEN_BYTES, RENEWAL_TOKEN_EXPIRY_SECONDS, RENEWAL_TOKEN_LENGTH,
    SIGNED_TOKEN_EXPIRY_SECONDS,
};
pub use user::User;
