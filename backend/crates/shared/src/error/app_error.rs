//! Application Error - one categorized failure
//!
//! Defines [`AppError`] and the single-error [`AppResult<T>`] alias used by
//! field validators.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use serde::Serialize;

use super::kind::ErrorKind;

/// One validation or business failure
///
/// ## Fields
/// * `kind` - failure category
/// * `code` - stable machine-readable code, e.g. `Title.Empty`
/// * `message` - human-readable description
/// * `source` - underlying error (debugging only, never serialized)
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::validation("Title.Empty", "Title cannot be empty.");
/// assert_eq!(err.kind(), ErrorKind::Validation);
/// assert_eq!(err.code(), "Title.Empty");
/// ```
#[derive(Serialize)]
pub struct AppError {
    kind: ErrorKind,
    code: Cow<'static, str>,
    message: Cow<'static, str>,
    #[serde(skip)]
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// `Result<T, AppError>`: the value, or exactly one error.
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::{AppError, AppResult};
///
/// fn page_size(n: u32) -> AppResult<u32> {
///     if n == 0 {
///         return Err(AppError::validation("PageSize.Empty", "Page size cannot be empty."));
///     }
///     Ok(n)
/// }
/// assert!(page_size(0).is_err());
/// ```
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    #[inline]
    pub fn new(
        kind: ErrorKind,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            source: None,
        }
    }

    #[inline]
    pub fn validation(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Validation, code, message)
    }

    #[inline]
    pub fn unauthorized(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Unauthorized, code, message)
    }

    #[inline]
    pub fn forbidden(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Forbidden, code, message)
    }

    #[inline]
    pub fn not_found(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::NotFound, code, message)
    }

    #[inline]
    pub fn conflict(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Conflict, code, message)
    }

    #[inline]
    pub fn unexpected(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Unexpected, code, message)
    }

    /// Attach the underlying error (debugging only)
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::app_error::AppError;
    ///
    /// let parse = "x".parse::<u32>().unwrap_err();
    /// let err = AppError::unexpected("Config.Invalid", "Bad config").with_source(parse);
    /// assert!(std::error::Error::source(&err).is_some());
    /// ```
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("code", &self.code);
        builder.field("message", &self.message);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.code, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

// ============================================================================
// Result extension traits
// ============================================================================

/// Converts foreign `Result`s into [`AppResult`]
pub trait ResultExt<T, E> {
    fn map_app_err(
        self,
        kind: ErrorKind,
        code: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn map_app_err(
        self,
        kind: ErrorKind,
        code: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static,
    {
        self.map_err(|e| AppError::new(kind, code, message).with_source(e))
    }
}

/// Converts `Option`s into [`AppResult`]
pub trait OptionExt<T> {
    fn ok_or_not_found(
        self,
        code: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(
        self,
        code: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(code, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::NotFound, "User.NotFound", "User not found.");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.code(), "User.NotFound");
        assert_eq!(err.message(), "User not found.");
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(AppError::validation("a", "b").kind(), ErrorKind::Validation);
        assert_eq!(AppError::unauthorized("a", "b").kind(), ErrorKind::Unauthorized);
        assert_eq!(AppError::forbidden("a", "b").kind(), ErrorKind::Forbidden);
        assert_eq!(AppError::not_found("a", "b").kind(), ErrorKind::NotFound);
        assert_eq!(AppError::conflict("a", "b").kind(), ErrorKind::Conflict);
        assert_eq!(AppError::unexpected("a", "b").kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_owned_code() {
        let field = "Title";
        let err = AppError::validation(format!("{field}.Empty"), "Title cannot be empty.");
        assert_eq!(err.code(), "Title.Empty");
    }

    #[test]
    fn test_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = AppError::unexpected("Io.Failed", "Failed to read file").with_source(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display() {
        let err = AppError::not_found("User.NotFound", "User not found.");
        assert_eq!(err.to_string(), "[Not Found] User.NotFound: User not found.");
    }

    #[test]
    fn test_serialize_skips_source() {
        let io_err = std::io::Error::other("disk");
        let err = AppError::unexpected("Io.Failed", "Failed").with_source(io_err);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "UNEXPECTED", "code": "Io.Failed", "message": "Failed"})
        );
    }

    #[test]
    fn test_result_ext() {
        let result: Result<i32, std::num::ParseIntError> = "abc".parse();
        let app_result = result.map_app_err(ErrorKind::Validation, "Page.Invalid", "Not a number");
        assert_eq!(app_result.unwrap_err().code(), "Page.Invalid");
    }

    #[test]
    fn test_option_ext() {
        let none: Option<i32> = None;
        let err = none.ok_or_not_found("Item.NotFound", "Item not found").unwrap_err();
        assert_eq!(err.status_code(), 404);

        let some = Some(42);
        assert_eq!(some.ok_or_not_found("Item.NotFound", "Item not found").unwrap(), 42);
    }
}
