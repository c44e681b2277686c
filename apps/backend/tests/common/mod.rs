#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::WWW_AUTHENTICATE;
use actix_web::http::StatusCode;
use backend_test_support::problem_details::{
    assert_problem_details_from_service_response, ProblemDetailsLike,
};

// Logging is auto-installed for every test binary that includes `common`.
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert the full error contract for `resp` and return the parsed body.
///
/// On top of the shared Problem Details checks: `type` is `/errors/{code}`,
/// `detail` matches, the trace id came from `RequestTrace`, and
/// `WWW-Authenticate: Bearer` is present on 401 only.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_detail: &str,
) -> ProblemDetailsLike {
    let www_authenticate = resp
        .headers()
        .get(WWW_AUTHENTICATE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if expected_status == StatusCode::UNAUTHORIZED {
        assert_eq!(www_authenticate.as_deref(), Some("Bearer"));
    } else {
        assert!(
            www_authenticate.is_none(),
            "{expected_status} responses must not carry WWW-Authenticate"
        );
    }

    let problem =
        assert_problem_details_from_service_response(resp, expected_code, expected_status).await;

    assert_eq!(problem.detail, expected_detail);
    assert_eq!(problem.type_, format!("/errors/{expected_code}"));
    assert!(!problem.trace_id.is_empty());
    assert_ne!(problem.trace_id, "unknown", "trace id must come from RequestTrace");

    problem
}

/// Problem body with the per-request trace id blanked, for comparing responses.
pub fn without_trace_id(mut problem: ProblemDetailsLike) -> ProblemDetailsLike {
    problem.trace_id.clear();
    problem
}
