//! Blog Error Types
//!
//! Business-rule failures raised by handlers and repositories. They are
//! converted into the unified `kernel::error::AppError` at the handler
//! boundary, where they are also logged.

use kernel::error::{app_error::AppError, error_list::ErrorList, kind::ErrorKind};
use platform::password::MalformedReason;
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Message shared by every credential failure so callers cannot tell an
/// unknown username from a wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    /// Username already registered
    #[error("This username is already in use.")]
    UsernameTaken,

    /// Email already registered
    #[error("This email is already in use.")]
    EmailTaken,

    /// Unknown username, wrong password or inactive account
    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("The user with the provided id was not found.")]
    UserNotFound,

    #[error("The article with the provided id was not found.")]
    ArticleNotFound,

    /// Principal lacks the role or ownership required
    #[error("You are not allowed to perform this action.")]
    Forbidden,

    /// Token missing, tampered with or expired
    #[error("The access token is invalid or expired.")]
    InvalidToken,

    /// Stored credential does not parse
    #[error("Stored credential is corrupted: {0}")]
    CorruptedCredential(MalformedReason),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::UsernameTaken | BlogError::EmailTaken => ErrorKind::Conflict,
            BlogError::InvalidCredentials | BlogError::InvalidToken => ErrorKind::Unauthorized,
            BlogError::UserNotFound | BlogError::ArticleNotFound => ErrorKind::NotFound,
            BlogError::Forbidden => ErrorKind::Forbidden,
            BlogError::CorruptedCredential(_) | BlogError::Storage(_) | BlogError::Internal(_) => {
                ErrorKind::Unexpected
            }
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            BlogError::UsernameTaken => "User.UsernameTaken",
            BlogError::EmailTaken => "User.EmailTaken",
            BlogError::InvalidCredentials => "User.InvalidCredentials",
            BlogError::UserNotFound => "User.NotFound",
            BlogError::ArticleNotFound => "Article.NotFound",
            BlogError::Forbidden => "Auth.Forbidden",
            BlogError::InvalidToken => "Auth.InvalidToken",
            BlogError::CorruptedCredential(_) => "Credential.Corrupted",
            BlogError::Storage(_) | BlogError::Internal(_) => "General.Unexpected",
        }
    }

    /// Convert to AppError
    ///
    /// Unexpected errors carry a generic message; the detail only goes to
    /// the log.
    pub fn to_app_error(&self) -> AppError {
        let message = match self.kind() {
            ErrorKind::Unexpected => "An unexpected error occurred.".to_string(),
            _ => self.to_string(),
        };
        AppError::new(self.kind(), self.code(), message)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BlogError::CorruptedCredential(reason) => {
                tracing::error!(reason = %reason, "Stored credential failed to parse");
            }
            BlogError::Storage(msg) => {
                tracing::error!(message = %msg, "Blog storage error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            BlogError::InvalidToken => {
                tracing::warn!("Rejected access token");
            }
            BlogError::Forbidden => {
                tracing::warn!("Forbidden action attempted");
            }
            _ => {
                tracing::debug!(code = self.code(), "Blog error");
            }
        }
    }
}

impl From<BlogError> for AppError {
    fn from(err: BlogError) -> Self {
        err.log();
        err.to_app_error()
    }
}

impl From<BlogError> for ErrorList {
    fn from(err: BlogError) -> Self {
        ErrorList::new(err.into())
    }
}
