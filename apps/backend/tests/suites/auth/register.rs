use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::unique_helpers::unique_email;
use serde_json::Value;

use crate::common::assert_problem;
use crate::support::factory::{login_request, register_request, register_user};
use crate::support::{create_test_app, sqlite_state, test_state};

#[actix_web::test]
async fn register_returns_201_with_token_and_public_user() {
    let state = test_state();
    let app = create_test_app(state.clone()).await;
    let email = unique_email("register");

    let body = register_user(&app, &email, "secret1").await;

    let user = body["user"].as_object().expect("user object");
    assert_eq!(user["email"], email.as_str());
    assert!(user.contains_key("created_at"));
    assert!(!user.contains_key("password"));
    assert!(!user.contains_key("password_hash"));

    let token = body["token"].as_str().expect("token string");
    assert_eq!(token.split('.').count(), 3);
    let claims = state.tokens.validate_now(token).expect("issued token validates");
    assert_eq!(Value::from(claims.user_id), user["id"]);
    assert_eq!(claims.iss, "recipe-app");
}

#[actix_web::test]
async fn register_twice_is_conflict_without_token() {
    let app = create_test_app(test_state()).await;
    let email = unique_email("dup");
    register_user(&app, &email, "secret1").await;

    let resp = test::call_service(&app, register_request(&email, "secret2")).await;

    assert_problem(
        resp,
        StatusCode::CONFLICT,
        "UNIQUE_EMAIL",
        "Email already registered",
    )
    .await;
}

#[actix_web::test]
async fn register_rejects_blank_fields() {
    let app = create_test_app(test_state()).await;

    let resp = test::call_service(&app, register_request("", "secret1")).await;
    assert_problem(
        resp,
        StatusCode::BAD_REQUEST,
        "INVALID_EMAIL",
        "Email and password are required",
    )
    .await;

    let resp = test::call_service(&app, register_request("cook@example.test", "")).await;
    assert_problem(
        resp,
        StatusCode::BAD_REQUEST,
        "INVALID_PASSWORD",
        "Email and password are required",
    )
    .await;
}

#[actix_web::test]
async fn register_rejects_short_password() {
    let app = create_test_app(test_state()).await;

    let resp = test::call_service(&app, register_request(&unique_email("short"), "12345")).await;

    assert_problem(
        resp,
        StatusCode::BAD_REQUEST,
        "INVALID_PASSWORD",
        "Password must be at least 6 characters",
    )
    .await;
}

#[actix_web::test]
async fn register_missing_fields_are_treated_as_blank() {
    let app = create_test_app(test_state()).await;
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(serde_json::json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_problem(
        resp,
        StatusCode::BAD_REQUEST,
        "INVALID_EMAIL",
        "Email and password are required",
    )
    .await;
}

#[actix_web::test]
async fn register_malformed_json_is_bad_request() {
    let app = create_test_app(test_state()).await;
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"email": "cook@example.test", "password": "#)
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_problem(
        resp,
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
        "Invalid JSON: unexpected end of input",
    )
    .await;
}

#[actix_web::test]
async fn register_and_login_against_sqlite() {
    let app = create_test_app(sqlite_state().await).await;
    let email = unique_email("sqlite");

    let registered = register_user(&app, &email, "secret1").await;

    let resp = test::call_service(&app, register_request(&email, "secret1")).await;
    assert_problem(
        resp,
        StatusCode::CONFLICT,
        "UNIQUE_EMAIL",
        "Email already registered",
    )
    .await;

    let resp = test::call_service(&app, login_request(&email, "secret1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let logged_in: Value = test::read_body_json(resp).await;
    assert_eq!(logged_in["user"]["id"], registered["user"]["id"]);
}
