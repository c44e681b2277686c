// Error mapping: pure conversions, no HTTP server or database.
use actix_web::body::to_bytes;
use actix_web::http::header;
use actix_web::ResponseError;

use crate::auth::jwt::TokenError;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;

#[test]
fn maps_unique_email_conflict_to_409() {
    let de = DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::UniqueEmail);
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_other_conflict_to_generic_code() {
    let de = DomainError::conflict(ConflictKind::Other("x".into()), "conflict");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::Conflict);
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::User, "no user").into();
    assert_eq!(app.code(), ErrorCode::UserNotFound);
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_every_infra_kind_to_internal() {
    for kind in [
        InfraErrorKind::Timeout,
        InfraErrorKind::DbUnavailable,
        InfraErrorKind::Other("boom".into()),
    ] {
        let app: AppError = DomainError::infra(kind, "down").into();
        assert_eq!(app.code(), ErrorCode::Internal);
        assert_eq!(app.status().as_u16(), 500);
    }
}

#[test]
fn token_validation_failures_collapse_to_unauthorized() {
    for err in [
        TokenError::Malformed,
        TokenError::AlgorithmMismatch {
            found: "none".into(),
        },
        TokenError::InvalidSignature,
        TokenError::Expired,
        TokenError::NotYetValid,
    ] {
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Unauthorized));
    }
}

#[test]
fn token_configuration_error_is_a_config_error() {
    let app: AppError = TokenError::Configuration("no secret".into()).into();
    assert_eq!(app.code(), ErrorCode::ConfigError);
    assert_eq!(app.status().as_u16(), 500);
}

#[actix_web::test]
async fn internal_detail_is_not_echoed() {
    let app = AppError::internal("connection refused to 10.0.0.5:5432");
    let resp = app.error_response();
    let body = to_bytes(resp.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["code"], "INTERNAL");
    assert_eq!(json["detail"], "Internal server error");
    assert!(!String::from_utf8_lossy(&body).contains("10.0.0.5"));
}

#[actix_web::test]
async fn unauthorized_sets_www_authenticate() {
    let resp = AppError::unauthorized().error_response();
    assert_eq!(resp.status().as_u16(), 401);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    assert!(resp.headers().get("x-trace-id").is_some());
}

#[test]
fn humanizes_codes_for_titles() {
    assert_eq!(AppError::humanize_code("INVALID_CREDENTIALS"), "Invalid Credentials");
    assert_eq!(AppError::humanize_code("UNAUTHORIZED"), "Unauthorized");
}
