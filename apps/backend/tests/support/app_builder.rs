use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use auth_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use auth_backend::{routes, AppState, PasswordHasher, SeaUserRepository, SecurityConfig};
use sea_orm::{ConnectOptions, Database};

pub const TEST_SECRET: &[u8] = b"integration-test-secret-not-for-production";

pub fn security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET).expect("test secret is non-empty")
}

/// Minimal Argon2 cost so tests stay fast.
pub fn cheap_hasher() -> PasswordHasher {
    PasswordHasher::with_cost(8, 1, 1).expect("valid argon2 params")
}

/// State over a fresh in-memory repository.
pub fn test_state() -> AppState {
    AppState::in_memory(&security(), cheap_hasher())
}

/// State over a migrated in-memory SQLite database.
pub async fn sqlite_state() -> AppState {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opts).await.expect("sqlite connects");
    migration::migrate(&db).await.expect("migrations apply");

    AppState::new(
        Arc::new(SeaUserRepository::new(db)),
        &security(),
        cheap_hasher(),
    )
}

/// The production middleware stack and routes around `state`.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(TraceSpan)
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}
