use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::User => "User",
            UserRole::Admin => "Admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Case-insensitive parse of `User` / `Admin`
    pub fn parse(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AppError::validation("Role.Empty", "Role cannot be empty."));
        }
        if raw.eq_ignore_ascii_case("user") {
            Ok(UserRole::User)
        } else if raw.eq_ignore_ascii_case("admin") {
            Ok(UserRole::Admin)
        } else {
            Err(AppError::validation(
                "Role.Invalid",
                "Please provide a valid user role.",
            ))
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(UserRole::parse("admin").unwrap(), UserRole::Admin);
        assert_eq!(UserRole::parse("USER").unwrap(), UserRole::User);
        assert_eq!(UserRole::parse("moderator").unwrap_err().code(), "Role.Invalid");
        assert_eq!(UserRole::parse(" ").unwrap_err().code(), "Role.Empty");
    }

    #[test]
    fn test_default_is_user() {
        assert_eq!(UserRole::default(), UserRole::User);
        assert!(!UserRole::User.is_admin());
    }
}
