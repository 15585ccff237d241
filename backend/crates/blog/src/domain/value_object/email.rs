//! Email Value Object
//!
//! Shape check only; deliverability is not verified.

use kernel::error::app_error::AppResult;
use kernel::validation::TextRule;
use once_cell::sync::Lazy;
use regex::Regex;

pub const EMAIL: TextRule = TextRule::new("Email", "Email", 5, 254);

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_!#$%&'*+/=?{|}~^.-]+@[a-zA-Z0-9.-]+$")
        .expect("valid email regex")
});

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let value = EMAIL.check(raw)?;
        if !EMAIL_PATTERN.is_match(value) {
            return Err(EMAIL.violation("InvalidFormat", "Email format is invalid."));
        }
        Ok(Self(value.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Addresses are unique regardless of ASCII case
    pub fn matches(&self, other: &Email) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::parse("ada@example.com").is_ok());
        assert!(Email::parse("first.last+tag@sub.example.org").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert_eq!(Email::parse("").unwrap_err().code(), "Email.Empty");
        assert_eq!(Email::parse("a@b").unwrap_err().code(), "Email.TooShort");
        assert_eq!(Email::parse("no-at-sign.com").unwrap_err().code(), "Email.InvalidFormat");
        assert_eq!(Email::parse("two@@example.com").unwrap_err().code(), "Email.InvalidFormat");
        assert_eq!(Email::parse("ada@exa mple.com").unwrap_err().code(), "Email.InvalidFormat");
    }

    #[test]
    fn test_matches_ignores_case() {
        let a = Email::parse("Ada@Example.com").unwrap();
        let b = Email::parse("ada@example.com").unwrap();
        assert!(a.matches(&b));
    }
}
