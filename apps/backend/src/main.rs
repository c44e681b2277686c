use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use auth_backend::config::db::db_url;
use auth_backend::config::ServerConfig;
use auth_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use auth_backend::{
    connect_db, routes, telemetry, AppState, PasswordHasher, SeaUserRepository, SecurityConfig,
};
use tracing::info;

/// Print and exit(1). Configuration problems are fatal before the server binds.
fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("❌ {context}: {err}");
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker-compose env_file, or `set -a; . ./.env; set +a` locally).
    let server = ServerConfig::from_env().unwrap_or_else(|e| fail("invalid server config", e));
    let security = SecurityConfig::from_env().unwrap_or_else(|e| fail("invalid security config", e));
    let url = db_url().unwrap_or_else(|e| fail("invalid database config", e));

    let db = connect_db(&url)
        .await
        .unwrap_or_else(|e| fail("failed to prepare database", e));

    let state = web::Data::new(AppState::new(
        Arc::new(SeaUserRepository::new(db)),
        &security,
        PasswordHasher::default(),
    ));

    info!(host = %server.host, port = server.port, "Starting auth backend");

    HttpServer::new(move || {
        App::new()
            .wrap(TraceSpan)
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
