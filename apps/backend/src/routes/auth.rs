use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::auth::{self as auth_service, Credentials};
use crate::state::app_state::AppState;

/// POST /auth/register
async fn register(
    body: ValidatedJson<Credentials>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = auth_service::register(&app_state, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(session))
}

/// POST /auth/login
async fn login(
    body: ValidatedJson<Credentials>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = auth_service::login(&app_state, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(session))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}
