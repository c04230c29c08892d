#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;

// Logging is auto-installed for every test binary that pulls this module in.
#[ctor::ctor]
fn init_logging() {
    authgate_test_support::logging::init();
}

/// Validate the stable error contract for a response.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
) {
    authgate_test_support::problem_details::assert_problem_details(
        resp,
        expected_status,
        expected_code,
    )
    .await;
}
