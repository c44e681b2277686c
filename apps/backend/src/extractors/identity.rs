use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::Serialize;

use crate::auth::claims::Claims;
use crate::error::AppError;

/// Identity resolved by `JwtExtract` for the current request.
///
/// Handlers on protected scopes take this as a parameter. Outside a gated
/// scope extraction fails with 401.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedIdentity {
    pub user_id: i64,
    pub email: Option<String>,
}

impl From<Claims> for AuthenticatedIdentity {
    fn from(claims: Claims) -> Self {
        let email = Some(claims.email).filter(|email| !email.is_empty());
        Self {
            user_id: claims.user_id,
            email,
        }
    }
}

impl FromRequest for AuthenticatedIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedIdentity>()
                .cloned()
                .ok_or_else(AppError::unauthorized),
        )
    }
}
