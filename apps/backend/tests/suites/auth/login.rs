use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::unique_helpers::unique_email;
use serde_json::Value;

use crate::common::{assert_problem, without_trace_id};
use crate::support::factory::{login_request, register_user};
use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn login_returns_token_for_registered_user() {
    let state = test_state();
    let app = create_test_app(state.clone()).await;
    let email = unique_email("login");
    let registered = register_user(&app, &email, "secret1").await;

    let resp = test::call_service(&app, login_request(&email, "secret1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["user"], registered["user"]);
    let claims = state
        .tokens
        .validate_now(body["token"].as_str().expect("token string"))
        .expect("login token validates");
    assert_eq!(Value::from(claims.user_id), registered["user"]["id"]);
}

#[actix_web::test]
async fn wrong_password_and_unknown_email_look_identical() {
    let app = create_test_app(test_state()).await;
    let email = unique_email("enum");
    register_user(&app, &email, "secret1").await;

    let resp = test::call_service(&app, login_request(&email, "wrong-password")).await;
    let wrong_password = assert_problem(
        resp,
        StatusCode::UNAUTHORIZED,
        "INVALID_CREDENTIALS",
        "Invalid email or password",
    )
    .await;

    let resp = test::call_service(&app, login_request(&unique_email("ghost"), "secret1")).await;
    let unknown_email = assert_problem(
        resp,
        StatusCode::UNAUTHORIZED,
        "INVALID_CREDENTIALS",
        "Invalid email or password",
    )
    .await;

    assert_eq!(
        without_trace_id(wrong_password),
        without_trace_id(unknown_email)
    );
}

#[actix_web::test]
async fn login_rejects_blank_fields() {
    let app = create_test_app(test_state()).await;

    let resp = test::call_service(&app, login_request("  ", "secret1")).await;
    assert_problem(
        resp,
        StatusCode::BAD_REQUEST,
        "INVALID_EMAIL",
        "Email and password are required",
    )
    .await;

    let resp = test::call_service(&app, login_request("cook@example.test", "")).await;
    assert_problem(
        resp,
        StatusCode::BAD_REQUEST,
        "INVALID_PASSWORD",
        "Email and password are required",
    )
    .await;
}
