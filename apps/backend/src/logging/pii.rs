//! PII redaction for log output.
//!
//! Emails are the identity key of this service, so they show up in exactly
//! the log lines an operator wants to grep. Redaction keeps the first
//! character of the local part and the full domain.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
    });
    &EMAIL_REGEX
}

/// Mask email addresses in a string: keep the first character of the local
/// part, replace the rest with ***, keep the full domain.
pub fn redact(input: &str) -> String {
    email_regex()
        .replace_all(input, |caps: &regex::Captures| {
            let full_match = &caps[0];
            match full_match.find('@') {
                Some(at_pos) if at_pos > 0 => {
                    let first_char = &full_match[..1];
                    let domain = &full_match[at_pos..];
                    format!("{first_char}***{domain}")
                }
                _ => full_match.to_string(),
            }
        })
        .to_string()
}

/// Wrapper that redacts on Display/Debug, for ergonomic use in tracing fields.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
