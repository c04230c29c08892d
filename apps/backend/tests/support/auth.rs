//! JWT token helpers for tests.

use std::time::{Duration, SystemTime};

use authgate::auth::jwt::issue_access_token;
use authgate::repos::users::User;
use authgate::state::security_config::SecurityConfig;

/// A user record that exists only for token minting (no database row).
pub fn token_user(email: &str, first_name: &str, last_name: &str) -> User {
    let now = time::OffsetDateTime::now_utc();
    User {
        id: 0,
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        password_hash: String::new(),
        role: "USER".to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// Mint a bearer token for the given email.
pub fn mint_test_token(email: &str, sec: &SecurityConfig) -> String {
    issue_access_token(&token_user(email, "Test", "User"), SystemTime::now(), sec)
        .expect("should mint token successfully")
}

/// Full Authorization header value including the "Bearer " prefix.
pub fn bearer_header(email: &str, sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(email, sec))
}

/// Mint a token whose expiry is already in the past (issued one TTL plus an
/// hour ago).
pub fn mint_expired_token(email: &str, sec: &SecurityConfig) -> String {
    let issued = SystemTime::now()
        .checked_sub(sec.token_ttl + Duration::from_secs(3600))
        .expect("should compute past instant");
    issue_access_token(&token_user(email, "Test", "User"), issued, sec)
        .expect("should mint expired token successfully")
}
