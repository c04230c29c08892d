use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

use crate::auth::claims::{AccessClaims, REGISTERED_CLAIM_NAMES};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::users::User;
use crate::state::security_config::SecurityConfig;

/// Encode a date-valued extra claim as a JWT NumericDate (epoch seconds),
/// the same encoding `iat`/`exp` use.
pub fn date_claim(value: time::OffsetDateTime) -> Value {
    Value::from(value.unix_timestamp())
}

/// Mint an access token for `user` with the standard claims only.
pub fn issue_access_token(
    user: &User,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    issue_access_token_with_claims(user, Map::new(), now, security)
}

/// Mint an access token with issuer = user email, `iat` = now, `exp` = now +
/// configured TTL, the standard identity claims, and validated extra claims.
pub fn issue_access_token_with_claims(
    user: &User,
    extra_claims: Map<String, Value>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = unix_seconds(now)?;
    let exp = iat + security.token_ttl.as_secs() as i64;

    let claims = AccessClaims {
        iss: user.email.clone(),
        iat,
        exp,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email: user.email.clone(),
        extra: validate_extra_claims(extra_claims)?,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify signature and expiry, and return the decoded claims.
///
/// Errors:
/// - Expired token → `UNAUTHORIZED_EXPIRED_JWT`
/// - Invalid signature or otherwise malformed → `UNAUTHORIZED_INVALID_JWT`
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<AccessClaims, AppError> {
    // Default Validation already checks exp; pin algorithm to configured one.
    let validation = Validation::new(security.algorithm);

    decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}

/// Look up a claim by name after checking the token's signature.
///
/// Expiry is deliberately not enforced here, so expired tokens can still be
/// inspected; signature and malformed-token failures propagate. An absent
/// claim is a `CLAIM_NOT_FOUND` usage error.
pub fn extract_claim(
    name: &str,
    token: &str,
    security: &SecurityConfig,
) -> Result<Value, AppError> {
    let claims = decode_signature_only(token, security)?;
    claims.get(name).ok_or_else(|| {
        AppError::validation(
            ErrorCode::ClaimNotFound,
            format!("Claim was not found: {name}"),
        )
    })
}

/// A token is valid for `user` iff its email claim equals the user's email
/// and its expiry is strictly in the future. Expired or mismatched tokens
/// yield `Ok(false)`; signature and decode failures propagate as errors.
pub fn is_token_valid(
    token: &str,
    user: &User,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<bool, AppError> {
    let claims = decode_signature_only(token, security)?;
    Ok(claims.email == user.email && claims.exp > unix_seconds(now)?)
}

fn decode_signature_only(
    token: &str,
    security: &SecurityConfig,
) -> Result<AccessClaims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;

    decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized_invalid_jwt())
}

/// Extra claims must be strings or numbers (doubles and integers; dates as
/// numeric epoch seconds via [`date_claim`]) and may not shadow registered
/// claims. Everything else is rejected at issuance.
fn validate_extra_claims(
    extra_claims: Map<String, Value>,
) -> Result<BTreeMap<String, Value>, AppError> {
    let mut validated = BTreeMap::new();
    for (name, value) in extra_claims {
        if REGISTERED_CLAIM_NAMES.contains(&name.as_str()) {
            return Err(AppError::validation(
                ErrorCode::ValidationError,
                format!("Extra claim '{name}' would shadow a registered claim"),
            ));
        }
        match &value {
            Value::String(_) | Value::Number(_) => {}
            other => {
                return Err(AppError::validation(
                    ErrorCode::UnsupportedClaimType,
                    format!("Claim type is not supported for '{name}': {}", json_type(other)),
                ))
            }
        }
        validated.insert(name, value);
    }
    Ok(validated)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unix_seconds(now: SystemTime) -> Result<i64, AppError> {
    Ok(now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use serde_json::{json, Map, Value};

    use super::{
        date_claim, extract_claim, is_token_valid, issue_access_token,
        issue_access_token_with_claims, verify_access_token,
    };
    use crate::error::AppError;
    use crate::errors::ErrorCode;
    use crate::repos::users::User;
    use crate::state::security_config::SecurityConfig;

    fn test_user(email: &str) -> User {
        let now = time::OffsetDateTime::now_utc();
        User {
            id: 1,
            email: email.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password_hash: String::new(),
            role: "USER".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn test_security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let security = test_security();
        let user = test_user("ada@example.test");
        let now = SystemTime::now();

        let token = issue_access_token(&user, now, &security).unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        assert_eq!(claims.iss, user.email);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.first_name, "Ada");
        assert_eq!(claims.last_name, "Lovelace");
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(
            claims.exp,
            claims.iat + security.token_ttl.as_secs() as i64
        );
    }

    #[test]
    fn freshly_issued_token_is_valid_for_its_user() {
        let security = test_security();
        let user = test_user("a@x.com");
        let now = SystemTime::now();

        let token = issue_access_token(&user, now, &security).unwrap();
        assert!(is_token_valid(&token, &user, now, &security).unwrap());
    }

    #[test]
    fn expired_token_is_invalid_but_inspectable() {
        let security = test_security();
        let user = test_user("expired@example.test");
        // Issue far enough in the past that the 24h TTL has elapsed.
        let issued = SystemTime::now() - Duration::from_secs(25 * 60 * 60);

        let token = issue_access_token(&user, issued, &security).unwrap();

        // verify enforces expiry
        match verify_access_token(&token, &security) {
            Err(AppError::UnauthorizedExpiredJwt) => {}
            other => panic!("expected expired-jwt error, got {other:?}"),
        }

        // is_token_valid reports false without erroring
        assert!(!is_token_valid(&token, &user, SystemTime::now(), &security).unwrap());

        // the email claim is still extractable (signature-only check)
        let email = extract_claim("email", &token, &security).unwrap();
        assert_eq!(email, json!("expired@example.test"));
    }

    #[test]
    fn token_is_invalid_for_a_different_user() {
        let security = test_security();
        let user = test_user("a@x.com");
        let other = test_user("b@x.com");
        let now = SystemTime::now();

        let token = issue_access_token(&user, now, &security).unwrap();
        assert!(!is_token_valid(&token, &other, now, &security).unwrap());
    }

    #[test]
    fn wrong_secret_fails_verification_and_extraction() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());
        let user = test_user("sig@example.test");

        let token = issue_access_token(&user, SystemTime::now(), &security_a).unwrap();

        match verify_access_token(&token, &security_b) {
            Err(AppError::UnauthorizedInvalidJwt) => {}
            other => panic!("expected invalid-jwt error, got {other:?}"),
        }
        match extract_claim("email", &token, &security_b) {
            Err(AppError::UnauthorizedInvalidJwt) => {}
            other => panic!("expected invalid-jwt error, got {other:?}"),
        }
        match is_token_valid(&token, &user, SystemTime::now(), &security_b) {
            Err(AppError::UnauthorizedInvalidJwt) => {}
            other => panic!("expected invalid-jwt error, got {other:?}"),
        }
    }

    #[test]
    fn extra_claims_accept_strings_and_numbers() {
        let security = test_security();
        let user = test_user("claims@example.test");
        let now = SystemTime::now();

        let mut extra = Map::new();
        extra.insert("role".to_string(), json!(3.14));
        extra.insert("tenant".to_string(), json!("acme"));
        extra.insert("level".to_string(), json!(7));
        extra.insert(
            "renewedAt".to_string(),
            date_claim(time::OffsetDateTime::now_utc()),
        );

        let token = issue_access_token_with_claims(&user, extra, now, &security).unwrap();

        assert_eq!(extract_claim("role", &token, &security).unwrap(), json!(3.14));
        assert_eq!(
            extract_claim("tenant", &token, &security).unwrap(),
            json!("acme")
        );
        assert_eq!(extract_claim("level", &token, &security).unwrap(), json!(7));
    }

    #[test]
    fn unsupported_extra_claim_types_are_rejected() {
        let security = test_security();
        let user = test_user("claims@example.test");
        let now = SystemTime::now();

        for bad in [json!({"nested": true}), json!([1, 2]), json!(true), Value::Null] {
            let mut extra = Map::new();
            extra.insert("role".to_string(), bad);
            let result = issue_access_token_with_claims(&user, extra, now, &security);
            match result {
                Err(AppError::Validation { code, .. }) => {
                    assert_eq!(code, ErrorCode::UnsupportedClaimType)
                }
                other => panic!("expected unsupported-claim-type error, got {other:?}"),
            }
        }
    }

    #[test]
    fn extra_claims_may_not_shadow_registered_claims() {
        let security = test_security();
        let user = test_user("claims@example.test");

        let mut extra = Map::new();
        extra.insert("email".to_string(), json!("spoofed@example.test"));
        let result =
            issue_access_token_with_claims(&user, extra, SystemTime::now(), &security);
        match result {
            Err(AppError::Validation { code, .. }) => {
                assert_eq!(code, ErrorCode::ValidationError)
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn absent_claim_is_claim_not_found() {
        let security = test_security();
        let user = test_user("claims@example.test");
        let token = issue_access_token(&user, SystemTime::now(), &security).unwrap();

        match extract_claim("nope", &token, &security) {
            Err(AppError::Validation { code, .. }) => {
                assert_eq!(code, ErrorCode::ClaimNotFound)
            }
            other => panic!("expected claim-not-found error, got {other:?}"),
        }
    }

    #[test]
    fn registered_claims_are_extractable_by_name() {
        let security = test_security();
        let user = test_user("ada@example.test");
        let token = issue_access_token(&user, SystemTime::now(), &security).unwrap();

        assert_eq!(
            extract_claim("firstName", &token, &security).unwrap(),
            json!("Ada")
        );
        assert_eq!(
            extract_claim("iss", &token, &security).unwrap(),
            json!("ada@example.test")
        );
        assert!(extract_claim("exp", &token, &security).unwrap().is_number());
    }
}
