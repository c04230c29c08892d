//! AppState construction for tests.
//!
//! Tests run against in-memory SQLite so the full register/login/me flow is
//! exercised without external services; migrations run at build time.

use authgate::infra::state::build_state;
use authgate::state::app_state::AppState;
use authgate::state::security_config::SecurityConfig;
use authgate::AppError;

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
}

/// Database-backed state with the shared test security config.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_test_state_with_security(test_security()).await
}

/// Database-backed state with a caller-provided security config.
pub async fn build_test_state_with_security(
    security: SecurityConfig,
) -> Result<AppState, AppError> {
    build_state()
        .with_db_url("sqlite::memory:")
        .with_security(security)
        .build()
        .await
}
