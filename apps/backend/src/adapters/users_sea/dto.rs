//! DTOs for users_sea adapter.

use crate::auth::password::HashedPassword;

/// Row to insert for a newly registered user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub email: String,
    pub password_hash: HashedPassword,
}

impl UserCreate {
    pub fn new(email: impl Into<String>, password_hash: &HashedPassword) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.clone(),
        }
    }
}
