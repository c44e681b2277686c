//! User repository contract.
//!
//! The services layer only ever sees `dyn UserRepository`; persistence lives in
//! `crate::adapters`.

use async_trait::async_trait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::auth::password::HashedPassword;
use crate::errors::domain::DomainError;

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: HashedPassword,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// User as returned to clients. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Store users with a unique email and look them up by email.
///
/// Implementations must be safe to call concurrently from many requests and
/// must treat both operations as atomic.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. The returned record carries the assigned id.
    ///
    /// Fails with `DomainError::Conflict(ConflictKind::UniqueEmail, _)` when the
    /// email is taken.
    async fn create(
        &self,
        email: &str,
        password_hash: &HashedPassword,
    ) -> Result<User, DomainError>;

    /// Fails with `DomainError::NotFound(NotFoundKind::User, _)` when no user has this email.
    async fn find_by_email(&self, email: &str) -> Result<User, DomainError>;
}
