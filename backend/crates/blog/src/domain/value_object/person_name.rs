//! First and last name value objects

use kernel::validation::TextRule;

pub const FIRST_NAME: TextRule = TextRule::new("FirstName", "First name", 2, 50);
pub const LAST_NAME: TextRule = TextRule::new("LastName", "Last name", 2, 50);

bounded_text!(
    /// Given name, 2 to 50 characters
    FirstName => FIRST_NAME
);

bounded_text!(
    /// Family name, 2 to 50 characters
    LastName => LAST_NAME
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name() {
        assert_eq!(FirstName::parse("Ada").unwrap().as_str(), "Ada");
        assert_eq!(FirstName::parse("").unwrap_err().code(), "FirstName.Empty");
        assert_eq!(FirstName::parse("A").unwrap_err().code(), "FirstName.TooShort");
        assert_eq!(
            FirstName::parse(&"a".repeat(51)).unwrap_err().code(),
            "FirstName.TooLong"
        );
    }

    #[test]
    fn test_last_name_message() {
        let err = LastName::parse("L").unwrap_err();
        assert_eq!(err.code(), "LastName.TooShort");
        assert_eq!(err.message(), "Last name must be at least 2 characters long.");
    }
}
