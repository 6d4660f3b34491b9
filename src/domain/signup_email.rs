use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;

// Non-whitespace local part, a single `@`, and a dotted domain.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

/// A lower-cased, trimmed email. Outside this crate only `parse` builds one,
/// so every email that reaches a store has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupEmail(String);

impl SignupEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        match is_valid_email(&s) {
            true => Ok(Self::normalize(&s)),
            false => Err(format!("{} is not a valid signup email", s)),
        }
    }

    /// Normalization without validation, for lookups.
    pub(crate) fn normalize(s: &str) -> Self {
        Self(s.trim().to_lowercase())
    }
}

impl Display for SignupEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SignupEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
