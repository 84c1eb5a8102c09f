//! User entity representing a registered account in the directory.

use serde::{Deserialize, Serialize};

/// User entity as stored in the directory
///
/// Read-only to the token engine: nothing in this crate creates or
/// mutates users.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: u64,

    /// Login identifier presented at sign-in
    pub login_id: String,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Creates a new User instance
    pub fn new(
        id: u64,
        login_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            login_id: login_id.into(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("login_id", &self.login_id)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
