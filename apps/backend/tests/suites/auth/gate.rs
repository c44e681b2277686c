use actix_web::http::StatusCode;
use actix_web::test;
use auth_backend::{SecurityConfig, TokenService};
use backend_test_support::unique_helpers::unique_email;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::Value;
use time::{Duration, OffsetDateTime};

use crate::common::{assert_problem, without_trace_id};
use crate::support::factory::{me_request, register_user};
use crate::support::{create_test_app, test_state};

const UNAUTHORIZED_DETAIL: &str = "Authentication required";

#[actix_web::test]
async fn registered_token_opens_protected_route() {
    let app = create_test_app(test_state()).await;
    let email = unique_email("gate");
    let body = register_user(&app, &email, "secret1").await;
    let token = body["token"].as_str().expect("token string");

    let resp = test::call_service(&app, me_request(Some(&format!("Bearer {token}")))).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let identity: Value = test::read_body_json(resp).await;
    assert_eq!(identity["user_id"], body["user"]["id"]);
    assert_eq!(identity["email"], email.as_str());
}

#[actix_web::test]
async fn missing_header_is_unauthorized() {
    let app = create_test_app(test_state()).await;

    let resp = test::call_service(&app, me_request(None)).await;

    assert_problem(
        resp,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED",
        UNAUTHORIZED_DETAIL,
    )
    .await;
}

#[actix_web::test]
async fn every_rejection_renders_the_same_response() {
    let state = test_state();
    let app = create_test_app(state.clone()).await;
    let now = OffsetDateTime::now_utc();

    let valid = state.tokens.issue(1, "a@example.test", now).expect("issue");
    let expired = state
        .tokens
        .issue(1, "a@example.test", now - Duration::hours(25))
        .expect("issue");
    let not_yet_valid = state
        .tokens
        .issue(1, "a@example.test", now + Duration::hours(1))
        .expect("issue");
    let foreign = TokenService::new(&SecurityConfig::new(b"someone-else".to_vec()).expect("secret"))
        .issue(1, "a@example.test", now)
        .expect("issue");

    let payload = valid.split('.').nth(1).expect("payload segment");
    let alg_none = format!(
        "{}.{payload}.",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#)
    );

    let headers = [
        format!("Bearer {expired}"),
        format!("Bearer {not_yet_valid}"),
        format!("Bearer {foreign}"),
        format!("Bearer {alg_none}"),
        "Bearer not.a.jwt".to_string(),
        format!("bearer {valid}"),
        format!("Token {valid}"),
        valid.clone(),
        "Bearer ".to_string(),
    ];

    let mut bodies = Vec::new();
    for header in &headers {
        let resp = test::call_service(&app, me_request(Some(header))).await;
        let problem = assert_problem(
            resp,
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            UNAUTHORIZED_DETAIL,
        )
        .await;
        bodies.push(without_trace_id(problem));
    }

    let first = &bodies[0];
    assert!(bodies.iter().all(|body| body == first));

    // The untampered token is still accepted.
    let resp = test::call_service(&app, me_request(Some(&format!("Bearer {valid}")))).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn public_routes_are_not_gated() {
    let app = create_test_app(test_state()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
