use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::AuthenticatedIdentity;

/// GET /api/me: the identity the bearer token resolved to.
async fn me(identity: AuthenticatedIdentity) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(identity))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(me));
}
