//! Username Value Object
//!
//! Public login handle. ASCII letters, digits, `_` and `.` only, 3 to 20
//! characters. Compared exactly (case-sensitive).

use kernel::error::app_error::{AppError, AppResult};
use kernel::validation::TextRule;
use once_cell::sync::Lazy;
use regex::Regex;

pub const USERNAME: TextRule = TextRule::new("Username", "Username", 3, 20);

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.]+$").expect("valid username regex"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Full registration rules
    pub fn parse(raw: &str) -> AppResult<Self> {
        let value = USERNAME.check(raw)?;
        if !USERNAME_PATTERN.is_match(value) {
            return Err(USERNAME.violation(
                "InvalidCharacters",
                "Username can only contain letters, numbers, underscores, and periods.",
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// Login form: emptiness and length only, with an opaque message so
    /// the rules are not disclosed.
    pub fn for_login(raw: &str) -> AppResult<Self> {
        match USERNAME.check(raw) {
            Ok(value) => Ok(Self(value.to_string())),
            Err(e) if e.code() == "Username.Empty" => Err(e),
            Err(_) => Err(invalid()),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid() -> AppError {
    USERNAME.violation("Invalid", "Username invalid.")
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(Username::parse("ada.lovelace").is_ok());
        assert!(Username::parse("user_01").is_ok());
    }

    #[test]
    fn test_invalid_characters() {
        let err = Username::parse("ada lovelace").unwrap_err();
        assert_eq!(err.code(), "Username.InvalidCharacters");
        assert_eq!(Username::parse("ada-l").unwrap_err().code(), "Username.InvalidCharacters");
    }

    #[test]
    fn test_length_before_pattern() {
        assert_eq!(Username::parse("a!").unwrap_err().code(), "Username.TooShort");
        assert_eq!(Username::parse(&"a".repeat(21)).unwrap_err().code(), "Username.TooLong");
    }

    #[test]
    fn test_for_login_is_opaque() {
        assert_eq!(Username::for_login("").unwrap_err().code(), "Username.Empty");
        assert_eq!(Username::for_login("ab").unwrap_err().code(), "Username.Invalid");
        assert_eq!(Username::for_login(&"a".repeat(21)).unwrap_err().code(), "Username.Invalid");
        // Character rules are not applied at login
        assert!(Username::for_login("ada-l").is_ok());
    }
}
