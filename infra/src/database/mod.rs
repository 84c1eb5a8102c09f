//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - Repository implementations for users and token records

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlTokenRepository, MySqlUserRepository};
