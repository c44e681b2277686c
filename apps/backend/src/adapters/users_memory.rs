//! In-process user store for tests and local runs without a database.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::auth::password::HashedPassword;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::users::{User, UserRepository};

/// Users keyed by email. Check-and-insert happens under the entry's shard lock,
/// so concurrent registrations of one email yield exactly one winner.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
    next_id: AtomicI64,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self {
            users: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        email: &str,
        password_hash: &HashedPassword,
    ) -> Result<User, DomainError> {
        match self.users.entry(email.to_string()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::UniqueEmail,
                "Email already registered",
            )),
            Entry::Vacant(slot) => {
                let now = time::OffsetDateTime::now_utc();
                let user = User {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed),
                    email: email.to_string(),
                    password_hash: password_hash.clone(),
                    created_at: now,
                    updated_at: now,
                };
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        self.users
            .get(email)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found"))
    }
}
