//! Problem Details assertions shared by the test binaries, without depending
//! on backend types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Local mirror of the backend's Problem Details body.
#[derive(Debug, Deserialize)]
struct ProblemDetailsLike {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    type_: String,
    title: String,
    status: u16,
    detail: String,
    code: String,
    trace_id: String,
}

/// Assert that a response conforms to the stable error contract:
/// expected status, `application/problem+json` body whose `trace_id` matches
/// the `x-trace-id` header, the expected error code, and (for 401s) the
/// `WWW-Authenticate: Bearer` header.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
) {
    assert_eq!(resp.status(), expected_status);

    let headers = resp.headers().clone();

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let trace_id_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8")
        .to_string();
    assert!(!trace_id_header.is_empty());

    if expected_status == StatusCode::UNAUTHORIZED {
        let www_auth = headers
            .get("www-authenticate")
            .expect("401 responses must carry WWW-Authenticate");
        assert_eq!(www_auth.to_str().unwrap(), "Bearer");
    }

    let body = actix_web::test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).expect("response body should be valid UTF-8");
    let problem: ProblemDetailsLike = serde_json::from_str(body_str)
        .unwrap_or_else(|_| panic!("body is not Problem Details JSON: {body_str}"));

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(!problem.title.is_empty());
    assert!(!problem.detail.is_empty());
    assert_eq!(
        problem.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );
}
