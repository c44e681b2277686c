//! Bearer-token gate for protected scopes.
//!
//! Wraps a scope (e.g. `/api`). A request is let through only if its
//! `Authorization` header carries a token the `TokenService` accepts; the
//! resulting `AuthenticatedIdentity` is stored in request extensions for the
//! `AuthenticatedIdentity` extractor. Every rejection renders the same 401.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use thiserror::Error as ThisError;
use time::OffsetDateTime;

use crate::auth::jwt::{TokenError, TokenService};
use crate::error::AppError;
use crate::extractors::identity::AuthenticatedIdentity;
use crate::logging::security;
use crate::state::app_state::AppState;

/// Why the gate refused a request. Only ever logged.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("missing Authorization header")]
    MissingCredential,
    #[error("Authorization header is not of the form `Bearer <token>`")]
    MalformedCredential,
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl GateError {
    pub fn reason(&self) -> &'static str {
        match self {
            GateError::MissingCredential => "missing_credential",
            GateError::MalformedCredential => "malformed_credential",
            GateError::Token(err) => err.reason(),
        }
    }
}

/// Decide whether a request carrying `header` is authenticated as of `now`.
pub fn authenticate(
    header: Option<&HeaderValue>,
    tokens: &TokenService,
    now: OffsetDateTime,
) -> Result<AuthenticatedIdentity, GateError> {
    let raw = header.ok_or(GateError::MissingCredential)?;
    let value = raw.to_str().map_err(|_| GateError::MalformedCredential)?;
    let token = bearer_token(value).ok_or(GateError::MalformedCredential)?;

    let claims = tokens.validate(token, now)?;
    Ok(AuthenticatedIdentity::from(claims))
}

/// Exactly `Bearer <token>`: case-sensitive scheme, one space, no other whitespace.
fn bearer_token(value: &str) -> Option<&str> {
    let token = value.strip_prefix("Bearer ")?;
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return None;
    }
    Some(token)
}

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    req.into_response(response).map_into_right_body()
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            return Box::pin(async move {
                Ok(reject(
                    req,
                    AppError::internal("AppState is not registered for a protected scope"),
                ))
            });
        };

        let decision = authenticate(
            req.headers().get(header::AUTHORIZATION),
            &state.tokens,
            OffsetDateTime::now_utc(),
        );

        match decision {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(rejection) => Box::pin(async move {
                security::token_rejected(rejection.reason(), req.path());
                Ok(reject(req, AppError::unauthorized()))
            }),
        }
    }
}
