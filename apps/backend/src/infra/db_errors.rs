//! SeaORM -> AppError translation.
//!
//! Adapters return `sea_orm::DbErr`; everything above them works in
//! `AppError`. The mapping keeps raw driver messages out of HTTP responses
//! and recognizes the unique-email constraint on both backends.

use tracing::warn;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// Recognize a violation of the users.email unique constraint.
/// SQLite reports "UNIQUE constraint failed: users.email"; Postgres names
/// the index, "users_email_key".
fn is_unique_email_violation(error_msg: &str) -> bool {
    error_msg.contains("UNIQUE constraint failed: users.email")
        || error_msg.contains("users_email_key")
}

/// Translate a `DbErr` into an `AppError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> AppError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            AppError::not_found(ErrorCode::UserNotFound, "Record not found")
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, "Database unavailable");
            AppError::db_unavailable("Database unavailable")
        }
        _ if is_unique_email_violation(&error_msg) => {
            AppError::conflict(ErrorCode::EmailTaken, "Email already registered")
        }
        _ => {
            warn!(trace_id = %trace_id, "Database error: {error_msg}");
            AppError::db("Database error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::map_db_err;
    use crate::error::AppError;
    use crate::errors::ErrorCode;

    #[test]
    fn unique_email_violation_maps_to_conflict() {
        for msg in [
            "Execution Error: error returned from database: (code: 2067) UNIQUE constraint failed: users.email",
            "Execution Error: duplicate key value violates unique constraint \"users_email_key\"",
        ] {
            let err = map_db_err(sea_orm::DbErr::Custom(msg.to_string()));
            match err {
                AppError::Conflict { code, .. } => assert_eq!(code, ErrorCode::EmailTaken),
                other => panic!("expected conflict, got {other:?}"),
            }
        }
    }

    #[test]
    fn unrelated_errors_map_to_db_error() {
        let err = map_db_err(sea_orm::DbErr::Custom("syntax error".to_string()));
        assert!(matches!(err, AppError::Db { .. }));
    }
}
