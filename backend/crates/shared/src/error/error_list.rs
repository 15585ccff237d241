//! Error List - aggregated failures
//!
//! [`Outcome<T>`] is the result every command and query returns: the value,
//! or a non-empty ordered [`ErrorList`]. Field validators produce single
//! [`AppResult`]s; [`Combine`] and [`collect_all`] fold them together while
//! keeping every failure.

use std::fmt;

use serde::Serialize;

use super::app_error::{AppError, AppResult};
use super::kind::ErrorKind;

/// Non-empty, ordered list of [`AppError`]
///
/// There is no way to build an empty list, so `Err(ErrorList)` always
/// carries at least one reason.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ErrorList(Vec<AppError>);

/// A value, or every reason it could not be produced.
pub type Outcome<T> = Result<T, ErrorList>;

impl ErrorList {
    /// List holding exactly one error
    pub fn new(error: AppError) -> Self {
        Self(vec![error])
    }

    /// Returns `None` for an empty vector
    pub fn from_vec(errors: Vec<AppError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn first(&self) -> &AppError {
        // Non-empty by construction
        &self.0[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AppError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Codes in order, e.g. `["Title.TooShort", "Content.TooShort"]`
    pub fn codes(&self) -> Vec<&str> {
        self.0.iter().map(AppError::code).collect()
    }

    /// Whether any error is fatal (data integrity, infrastructure)
    pub fn is_fatal(&self) -> bool {
        self.0.iter().any(AppError::is_fatal)
    }

    /// `Validation` when every error is a validation error, otherwise the
    /// kind of the first error.
    pub fn primary_kind(&self) -> ErrorKind {
        if self.0.iter().all(|e| e.kind() == ErrorKind::Validation) {
            ErrorKind::Validation
        } else {
            self.first().kind()
        }
    }

    pub fn into_vec(self) -> Vec<AppError> {
        self.0
    }
}

impl From<AppError> for ErrorList {
    fn from(error: AppError) -> Self {
        Self::new(error)
    }
}

impl IntoIterator for ErrorList {
    type Item = AppError;
    type IntoIter = std::vec::IntoIter<AppError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a AppError;
    type IntoIter = std::slice::Iter<'a, AppError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s): {}", self.0.len(), self.codes().join(", "))
    }
}

impl std::error::Error for ErrorList {}

// ============================================================================
// Consumption
// ============================================================================

/// Exhaustive consumption of an [`Outcome`]
pub trait OutcomeExt<T> {
    /// Calls exactly one of the two closures.
    fn fold<U>(self, on_success: impl FnOnce(T) -> U, on_failure: impl FnOnce(ErrorList) -> U)
    -> U;
}

impl<T> OutcomeExt<T> for Outcome<T> {
    fn fold<U>(
        self,
        on_success: impl FnOnce(T) -> U,
        on_failure: impl FnOnce(ErrorList) -> U,
    ) -> U {
        match self {
            Ok(value) => on_success(value),
            Err(errors) => on_failure(errors),
        }
    }
}

// ============================================================================
// Combination
// ============================================================================

/// Combines independent [`AppResult`]s, keeping every failure in order.
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::AppError;
/// use kernel::error::error_list::Combine;
///
/// let title: Result<&str, AppError> = Err(AppError::validation("Title.Empty", "empty"));
/// let content: Result<&str, AppError> = Err(AppError::validation("Content.TooShort", "short"));
/// let errors = (title, content).combine().unwrap_err();
/// assert_eq!(errors.codes(), vec!["Title.Empty", "Content.TooShort"]);
/// ```
pub trait Combine {
    type Output;

    fn combine(self) -> Outcome<Self::Output>;
}

macro_rules! impl_combine {
    ($($slot:ident: $ty:ident),+) => {
        impl<$($ty),+> Combine for ($(AppResult<$ty>,)+) {
            type Output = ($($ty,)+);

            fn combine(self) -> Outcome<Self::Output> {
                let ($($slot,)+) = self;
                let mut errors = Vec::new();
                $(
                    let $slot = match $slot {
                        Ok(value) => Some(value),
                        Err(error) => {
                            errors.push(error);
                            None
                        }
                    };
                )+
                if let Some(list) = ErrorList::from_vec(errors) {
                    return Err(list);
                }
                match ($($slot,)+) {
                    ($(Some($slot),)+) => Ok(($($slot,)+)),
                    _ => unreachable!("every slot holds a value when no error was collected"),
                }
            }
        }
    };
}

impl_combine!(a: A);
impl_combine!(a: A, b: B);
impl_combine!(a: A, b: B, c: C);
impl_combine!(a: A, b: B, c: C, d: D);
impl_combine!(a: A, b: B, c: C, d: D, e: E);
impl_combine!(a: A, b: B, c: C, d: D, e: E, f: F);

/// Collects homogeneous results; all failures are kept, in iteration order.
pub fn collect_all<T, I>(results: I) -> Outcome<Vec<T>>
where
    I: IntoIterator<Item = AppResult<T>>,
{
    let mut values = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(error) => errors.push(error),
        }
    }
    match ErrorList::from_vec(errors) {
        Some(list) => Err(list),
        None => Ok(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(code: &'static str) -> AppError {
        AppError::validation(code, "invalid")
    }

    #[test]
    fn test_empty_vec_is_rejected() {
        assert!(ErrorList::from_vec(Vec::new()).is_none());
        assert!(ErrorList::from_vec(vec![invalid("A.Empty")]).is_some());
    }

    #[test]
    fn test_first_and_codes() {
        let list = ErrorList::from_vec(vec![invalid("A.Empty"), invalid("B.TooLong")]).unwrap();
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
        assert_eq!(list.first().code(), "A.Empty");
        assert_eq!(list.codes(), vec!["A.Empty", "B.TooLong"]);
    }

    #[test]
    fn test_primary_kind() {
        let all_validation =
            ErrorList::from_vec(vec![invalid("A.Empty"), invalid("B.Empty")]).unwrap();
        assert_eq!(all_validation.primary_kind(), ErrorKind::Validation);

        let mixed = ErrorList::from_vec(vec![
            AppError::conflict("User.UsernameTaken", "taken"),
            invalid("B.Empty"),
        ])
        .unwrap();
        assert_eq!(mixed.primary_kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_is_fatal() {
        let list = ErrorList::new(AppError::unexpected("Credential.Corrupted", "corrupt"));
        assert!(list.is_fatal());
        assert!(!ErrorList::new(invalid("A.Empty")).is_fatal());
    }

    #[test]
    fn test_combine_all_success() {
        let combined = (Ok::<_, AppError>(1), Ok::<_, AppError>("two")).combine();
        assert_eq!(combined.unwrap(), (1, "two"));
    }

    #[test]
    fn test_combine_keeps_every_failure_in_order() {
        let combined = (
            Err::<u8, _>(invalid("A.Empty")),
            Ok::<u8, AppError>(2),
            Err::<u8, _>(invalid("C.TooShort")),
        )
            .combine();
        assert_eq!(combined.unwrap_err().codes(), vec!["A.Empty", "C.TooShort"]);
    }

    #[test]
    fn test_collect_all() {
        let ok = collect_all(vec![Ok(1), Ok(2)]);
        assert_eq!(ok.unwrap(), vec![1, 2]);

        let err = collect_all(vec![Ok(1), Err(invalid("B.Empty")), Err(invalid("C.Empty"))]);
        assert_eq!(err.unwrap_err().codes(), vec!["B.Empty", "C.Empty"]);
    }

    #[test]
    fn test_fold() {
        let ok: Outcome<u32> = Ok(3);
        assert_eq!(ok.fold(|v| v * 2, |_| 0), 6);

        let err: Outcome<u32> = Err(ErrorList::new(invalid("A.Empty")));
        assert_eq!(err.fold(|v| v as usize, |e| e.len() + 100), 101);
    }

    #[test]
    fn test_serialize_as_array() {
        let list = ErrorList::new(invalid("A.Empty"));
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json[0]["code"], "A.Empty");
        assert_eq!(json[0]["kind"], "VALIDATION");
    }
}
