pub mod auth;

pub use auth::{AuthResponse, LoginRequest, RefreshTokenRequest};
pub use author_shared::errors::ErrorResponse;
