use sea_orm::ConnectionTrait;
use tracing::{debug, info, warn};

use crate::adapters::users_sea::UserCreate;
use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::users::{self, User};

/// Role assigned to every self-registered account.
const DEFAULT_ROLE: &str = "USER";

/// Registration input, still carrying the plaintext password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Resolve a principal's identifier (email) to its stored user record.
/// Fails with USER_NOT_FOUND; the HTTP boundary converts that to a generic
/// authentication failure so it never leaks whether the email exists.
pub async fn load_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<User, AppError> {
    users::find_by_email(conn, email)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found"))
}

/// Create a user from a registration request: hash the password, store the
/// record with the default role. Duplicate email surfaces as EMAIL_TAKEN.
pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_user: NewUser,
) -> Result<User, AppError> {
    validate_registration(&new_user)?;

    let password_hash = hash_password(&new_user.password)?;
    let user = users::create_user(
        conn,
        UserCreate {
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash,
            role: DEFAULT_ROLE.to_string(),
        },
    )
    .await?;

    info!(user_id = user.id, email = %Redacted(&user.email), "User registered");
    Ok(user)
}

/// The authentication provider: credential lookup plus password comparison.
/// Unknown email and wrong password both collapse into INVALID_CREDENTIALS.
pub async fn authenticate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let user = match load_by_email(conn, email).await {
        Ok(user) => user,
        Err(AppError::NotFound { .. }) => {
            debug!(email = %Redacted(email), "Login attempt for unknown email");
            return Err(AppError::invalid_credentials());
        }
        Err(e) => return Err(e),
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, email = %Redacted(email), "Login attempt with wrong password");
        return Err(AppError::invalid_credentials());
    }

    debug!(user_id = user.id, email = %Redacted(email), "Credentials verified");
    Ok(user)
}

fn validate_registration(new_user: &NewUser) -> Result<(), AppError> {
    if new_user.email.trim().is_empty() || !new_user.email.contains('@') {
        return Err(AppError::validation(
            ErrorCode::InvalidEmail,
            "A valid email address is required",
        ));
    }
    if new_user.password.is_empty() {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "Password cannot be empty",
        ));
    }
    if new_user.first_name.trim().is_empty() || new_user.last_name.trim().is_empty() {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "First and last name are required",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_registration, NewUser};
    use crate::error::AppError;
    use crate::errors::ErrorCode;

    fn valid_input() -> NewUser {
        NewUser {
            email: "ada@example.test".to_string(),
            password: "hunter2!".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    #[test]
    fn accepts_valid_input() {
        assert!(validate_registration(&valid_input()).is_ok());
    }

    #[test]
    fn rejects_bad_email() {
        for email in ["", "   ", "not-an-email"] {
            let mut input = valid_input();
            input.email = email.to_string();
            match validate_registration(&input) {
                Err(AppError::Validation { code, .. }) => {
                    assert_eq!(code, ErrorCode::InvalidEmail)
                }
                other => panic!("expected invalid-email error, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_empty_password_and_names() {
        let mut input = valid_input();
        input.password = String::new();
        assert!(validate_registration(&input).is_err());

        let mut input = valid_input();
        input.first_name = "  ".to_string();
        assert!(validate_registration(&input).is_err());
    }
}
