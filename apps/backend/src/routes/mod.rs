use actix_web::web;

use crate::middleware::jwt_extract::JwtExtract;

pub mod auth;
pub mod health;
pub mod me;

/// Register every route. Used by `main.rs` and by the integration tests, so
/// the `/api` gate is part of the routing rather than of the server setup.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Liveness: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Public auth flows: /auth/register, /auth/login
    cfg.service(web::scope("/auth").configure(auth::configure_routes));

    // Protected: /api/**
    cfg.service(
        web::scope("/api")
            .wrap(JwtExtract)
            .configure(me::configure_routes),
    );
}
