//! Field Rules
//!
//! Pure checks shared by every bounded-string or required field.
//! Each check returns the first violated rule only; aggregation across
//! fields happens in [`super::pipeline`].
//!
//! Codes follow `<Field>.<Rule>`:
//! - `<Field>.Empty` - missing, empty or whitespace-only
//! - `<Field>.TooShort` - fewer characters than the minimum
//! - `<Field>.TooLong` - more characters than the maximum
//! - `<Field>.OutOfRange` - numeric value above the maximum

use uuid::Uuid;

use crate::error::app_error::{AppError, AppResult};

/// Required text field bounded by a character count
///
/// ## Examples
/// ```rust
/// use kernel::validation::field::TextRule;
///
/// const TITLE: TextRule = TextRule::new("Title", "Title", 3, 200);
///
/// assert!(TITLE.check("Rust ownership").is_ok());
/// assert_eq!(TITLE.check("   ").unwrap_err().code(), "Title.Empty");
/// assert_eq!(TITLE.check("ab").unwrap_err().code(), "Title.TooShort");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRule {
    field: &'static str,
    label: &'static str,
    min: usize,
    max: usize,
}

impl TextRule {
    /// * `field` - code prefix (`Title`)
    /// * `label` - name used in messages (`Article title`)
    pub const fn new(field: &'static str, label: &'static str, min: usize, max: usize) -> Self {
        Self {
            field,
            label,
            min,
            max,
        }
    }

    pub const fn field(&self) -> &'static str {
        self.field
    }

    pub const fn min(&self) -> usize {
        self.min
    }

    pub const fn max(&self) -> usize {
        self.max
    }

    /// Returns the input unchanged when every bound holds.
    pub fn check<'a>(&self, raw: &'a str) -> AppResult<&'a str> {
        if raw.trim().is_empty() {
            return Err(self.empty());
        }

        let length = raw.chars().count();

        if length < self.min {
            return Err(AppError::validation(
                format!("{}.TooShort", self.field),
                format!(
                    "{} must be at least {} characters long.",
                    self.label, self.min
                ),
            ));
        }

        if length > self.max {
            return Err(AppError::validation(
                format!("{}.TooLong", self.field),
                format!(
                    "{} must be at most {} characters long.",
                    self.label, self.max
                ),
            ));
        }

        Ok(raw)
    }

    /// `<Field>.Empty`
    pub fn empty(&self) -> AppError {
        AppError::validation(
            format!("{}.Empty", self.field),
            format!("{} cannot be empty.", self.label),
        )
    }

    /// Field-specific format violation, e.g. `Email.InvalidFormat`
    pub fn violation(&self, rule: &str, message: impl Into<String>) -> AppError {
        AppError::validation(format!("{}.{rule}", self.field), message.into())
    }
}

/// Rejects the nil UUID with `<Field>.Empty`.
pub fn require_id(field: &'static str, label: &'static str, id: &Uuid) -> AppResult<Uuid> {
    if id.is_nil() {
        return Err(AppError::validation(
            format!("{field}.Empty"),
            format!("{label} cannot be empty."),
        ));
    }
    Ok(*id)
}

/// Rejects `0` with `<Field>.Empty` and values above `max` with
/// `<Field>.OutOfRange`.
pub fn require_range(
    field: &'static str,
    label: &'static str,
    value: u32,
    max: u32,
) -> AppResult<u32> {
    if value == 0 {
        return Err(AppError::validation(
            format!("{field}.Empty"),
            format!("{label} cannot be empty."),
        ));
    }
    if value > max {
        return Err(AppError::validation(
            format!("{field}.OutOfRange"),
            format!("{label} must be at most {max}."),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    const CONTENT: TextRule = TextRule::new("Content", "Content", 10, 20);

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(CONTENT.check("").unwrap_err().code(), "Content.Empty");
        assert_eq!(CONTENT.check(" \t\n ").unwrap_err().code(), "Content.Empty");
    }

    #[test]
    fn test_too_short_names_minimum() {
        let err = CONTENT.check("short").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.code(), "Content.TooShort");
        assert!(err.message().contains("10"));
    }

    #[test]
    fn test_too_long() {
        let err = CONTENT.check(&"x".repeat(21)).unwrap_err();
        assert_eq!(err.code(), "Content.TooLong");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(CONTENT.check(&"x".repeat(10)).is_ok());
        assert!(CONTENT.check(&"x".repeat(20)).is_ok());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let ten = "あ".repeat(10);
        assert_eq!(ten.len(), 30);
        assert!(CONTENT.check(&ten).is_ok());
    }

    #[test]
    fn test_value_is_returned_unchanged() {
        assert_eq!(CONTENT.check("  padded text  ").unwrap(), "  padded text  ");
    }

    #[test]
    fn test_violation_code() {
        let err = CONTENT.violation("InvalidFormat", "bad");
        assert_eq!(err.code(), "Content.InvalidFormat");
    }

    #[test]
    fn test_require_id() {
        assert_eq!(
            require_id("ArticleId", "Article id", &Uuid::nil()).unwrap_err().code(),
            "ArticleId.Empty"
        );
        let id = Uuid::new_v4();
        assert_eq!(require_id("ArticleId", "Article id", &id).unwrap(), id);
    }

    #[test]
    fn test_require_range() {
        assert_eq!(
            require_range("PageSize", "Page size", 0, 100).unwrap_err().code(),
            "PageSize.Empty"
        );
        assert_eq!(
            require_range("PageSize", "Page size", 101, 100).unwrap_err().code(),
            "PageSize.OutOfRange"
        );
        assert_eq!(require_range("PageSize", "Page size", 100, 100).unwrap(), 100);
    }
}
