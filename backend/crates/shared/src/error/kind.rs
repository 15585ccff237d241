//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum shared by every command and query.

use serde::Serialize;

/// Failure category carried by every [`AppError`](super::app_error::AppError).
///
/// The transport layer decides how each kind is rendered. `status_code`
/// is the conventional HTTP mapping, exposed as a hint for that layer.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::NotFound;
/// assert_eq!(kind.status_code(), 404);
/// assert_eq!(kind.as_str(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Caller supplied bad input; recoverable by correcting the input
    Validation,
    /// Caller is not authenticated or credentials were rejected
    Unauthorized,
    /// Authenticated principal lacks the role for this operation
    Forbidden,
    /// Referenced resource does not exist
    NotFound,
    /// Request conflicts with stored state (e.g. uniqueness)
    Conflict,
    /// Data-integrity or infrastructure failure; always fatal
    Unexpected,
}

impl ErrorKind {
    /// Conventional HTTP status code for this kind
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::Validation.status_code(), 400);
    /// assert_eq!(ErrorKind::Unexpected.status_code(), 500);
    /// ```
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Unexpected => 500,
        }
    }

    /// Human-readable title
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation Failed",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Unexpected => "Unexpected Error",
        }
    }

    /// Fatal kinds abort the request and are never aggregated with
    /// validation failures.
    #[inline]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, ErrorKind::Unexpected)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
