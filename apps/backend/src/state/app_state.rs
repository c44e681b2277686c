use std::sync::Arc;

use crate::adapters::InMemoryUserRepository;
use crate::auth::jwt::TokenService;
use crate::auth::password::PasswordHasher;
use crate::repos::users::UserRepository;

use super::security_config::SecurityConfig;

/// Shared, read-only resources handed to every request.
#[derive(Clone)]
pub struct AppState {
    /// User store (database-backed in production, in-memory in tests)
    pub users: Arc<dyn UserRepository>,
    /// Token issuance and validation with the process-wide secret
    pub tokens: TokenService,
    /// Password hashing parameters
    pub hasher: PasswordHasher,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        security: &SecurityConfig,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            users,
            tokens: TokenService::new(security),
            hasher,
        }
    }

    /// State backed by an empty in-memory store.
    pub fn in_memory(security: &SecurityConfig, hasher: PasswordHasher) -> Self {
        Self::new(Arc::new(InMemoryUserRepository::new()), security, hasher)
    }
}
