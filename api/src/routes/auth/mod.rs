//! Authentication route handlers
//!
//! - Login with login identifier and password
//! - Renewal token rotation

pub mod login;
pub mod refresh;

pub use login::login;
pub use refresh::refresh;
