//! Claims carried by authgate-issued access tokens.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Claim names owned by the issuance path. Extra claims may not shadow these.
pub const REGISTERED_CLAIM_NAMES: &[&str] =
    &["iss", "iat", "exp", "email", "firstName", "lastName"];

/// Claims included in our backend-issued access tokens.
///
/// Registered claims are typed struct fields; caller-supplied extra claims
/// (strings and numbers only, validated at issuance) live in the flattened
/// map.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// Issuer — set to the user's email at issuance
    pub iss: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AccessClaims {
    pub fn issued_at(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.iat).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    pub fn expires_at(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.exp).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    /// Look up a claim by wire name, registered or extra.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            "iss" => Some(Value::from(self.iss.clone())),
            "iat" => Some(Value::from(self.iat)),
            "exp" => Some(Value::from(self.exp)),
            "email" => Some(Value::from(self.email.clone())),
            "firstName" => Some(Value::from(self.first_name.clone())),
            "lastName" => Some(Value::from(self.last_name.clone())),
            other => self.extra.get(other).cloned(),
        }
    }
}
