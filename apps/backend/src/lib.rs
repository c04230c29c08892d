#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::claims::AccessClaims;
pub use auth::jwt::{
    extract_claim, is_token_valid, issue_access_token, issue_access_token_with_claims,
    verify_access_token,
};
pub use error::AppError;
pub use extractors::{CurrentUser, CurrentUserRecord};
pub use infra::db::DbProfile;
pub use infra::state::build_state;
pub use middleware::{cors_middleware, JwtExtract, RequestTrace, StructuredLogger};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
