//! Token issuance and renewal
//!
//! - Signed token minting and verification (HS256)
//! - Renewal token generation with a bounded uniqueness retry
//! - Login and refresh over the user directory and token store

mod config;
mod generator;
mod primitives;
mod service;
mod signing;


pub use config::{TokenServiceConfig, DEFAULT_MAX_GENERATION_ATTEMPTS, DEFAULT_STORE_TIMEOUT_MS};
pub use generator::RenewalTokenGenerator;
pub use primitives::{Clock, FixedClock, OsRandomSource, RandomSource, SystemClock};
pub use service::TokenService;
pub use signing::SigningKey;
