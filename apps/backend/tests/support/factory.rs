use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use serde_json::{json, Value};

pub fn register_request(email: &str, password: &str) -> Request {
    test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({ "email": email, "password": password }))
        .to_request()
}

pub fn login_request(email: &str, password: &str) -> Request {
    test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request()
}

pub fn me_request(authorization: Option<&str>) -> Request {
    let mut req = test::TestRequest::get().uri("/api/me");
    if let Some(value) = authorization {
        req = req.insert_header(("Authorization", value));
    }
    req.to_request()
}

/// Register through the HTTP surface and return the `{token, user}` body.
pub async fn register_user<S>(app: &S, email: &str, password: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, register_request(email, password)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    test::read_body_json(resp).await
}
