//! Value Object Module
//!
//! Every value object is built through an `AppResult`-returning parser.
//! A parser reports the first rule its input violates; requests combine
//! several parsers to report every invalid field at once.

/// Declares a value object backed by a single [`TextRule`](kernel::validation::TextRule).
macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident => $rule:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn parse(raw: &str) -> kernel::error::app_error::AppResult<Self> {
                $rule.check(raw).map(|value| Self(value.to_string()))
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

pub mod article_text;
pub mod comment_content;
pub mod email;
pub mod page;
pub mod person_name;
pub mod user_password;
pub mod user_role;
pub mod username;

pub use article_text::{ArticleContent, ArticleTitle};
pub use comment_content::CommentContent;
pub use email::Email;
pub use page::PageRequest;
pub use person_name::{FirstName, LastName};
pub use user_password::{RawPassword, UserPassword, Verification};
pub use user_role::UserRole;
pub use username::Username;
