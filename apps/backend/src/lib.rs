#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

pub use adapters::{InMemoryUserRepository, SeaUserRepository};
pub use auth::claims::Claims;
pub use auth::jwt::{TokenError, TokenService};
pub use auth::password::{HashedPassword, PasswordHasher};
pub use error::AppError;
pub use extractors::{AuthenticatedIdentity, ValidatedJson};
pub use infra::db::connect_db;
pub use middleware::{JwtExtract, RequestTrace, StructuredLogger, TraceSpan};
pub use repos::users::{PublicUser, User, UserRepository};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
