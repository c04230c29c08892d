//! Error codes for the authgate API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. All codes
//! are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear in HTTP
//! responses.

use core::fmt;

/// Centralized error codes for the authgate API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Email/password pair did not match a stored credential
    InvalidCredentials,
    /// Token subject no longer exists in storage
    ForbiddenUserNotFound,

    // Token issuance / inspection
    /// Requested claim is absent from the token
    ClaimNotFound,
    /// Extra claim value is not a string, date, integer or double
    UnsupportedClaimType,

    // Request validation
    /// Invalid email address
    InvalidEmail,
    /// General validation error
    ValidationError,

    // Resources
    /// User not found
    UserNotFound,
    /// Email already registered
    EmailTaken,

    // Infrastructure
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Configuration error
    ConfigError,
    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Canonical SCREAMING_SNAKE_CASE string for HTTP responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            ErrorCode::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            ErrorCode::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            ErrorCode::ClaimNotFound => "CLAIM_NOT_FOUND",
            ErrorCode::UnsupportedClaimType => "UNSUPPORTED_CLAIM_TYPE",
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::EmailTaken => "EMAIL_TAKEN",
            ErrorCode::DbError => "DB_ERROR",
            ErrorCode::DbUnavailable => "DB_UNAVAILABLE",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
