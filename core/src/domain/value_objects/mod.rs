//! Value objects representing immutable domain concepts.

pub mod auth_result;

// Re-export commonly used types
pub use auth_result::{AuthCode, AuthResult};
