//! User repository trait defining the read-side interface to the user directory.
//!
//! The token engine never writes users; it only needs a user together with
//! its token record in a single lookup.

use async_trait::async_trait;

use crate::domain::entities::token::TokenRecord;
use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User lookups
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use author_core::repositories::UserRepository;
/// use author_core::domain::entities::{TokenRecord, User};
/// use author_core::errors::DomainError;
///
/// struct DirectoryUserRepository;
///
/// #[async_trait]
/// impl UserRepository for DirectoryUserRepository {
///     async fn find_with_token_by_login_id(
///         &self,
///         login_id: &str,
///     ) -> Result<Option<(User, TokenRecord)>, DomainError> {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by login identifier together with its token record
    ///
    /// # Arguments
    /// * `login_id` - The login identifier presented at sign-in
    ///
    /// # Returns
    /// * `Ok(Some((User, TokenRecord)))` - User found; the record is
    ///   `TokenRecord::for_user(user.id)` when none was ever saved
    /// * `Ok(None)` - No user with this login identifier
    /// * `Err(DomainError)` - Store failure
    async fn find_with_token_by_login_id(
        &self,
        login_id: &str,
    ) -> Result<Option<(User, TokenRecord)>, DomainError>;
}
