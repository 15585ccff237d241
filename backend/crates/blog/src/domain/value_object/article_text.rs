//! Article title and body

use kernel::validation::TextRule;

pub const ARTICLE_TITLE: TextRule = TextRule::new("Title", "Title", 3, 200);
pub const ARTICLE_CONTENT: TextRule = TextRule::new("Content", "Content", 10, 10_000);

/// Characters kept when an article is shown in a listing
pub const EXCERPT_LENGTH: usize = 500;

bounded_text!(
    /// Article title, 3 to 200 characters
    ArticleTitle => ARTICLE_TITLE
);

bounded_text!(
    /// Article body, 10 to 10 000 characters
    ArticleContent => ARTICLE_CONTENT
);

impl ArticleContent {
    /// First [`EXCERPT_LENGTH`] characters, with `...` appended when cut
    pub fn excerpt(&self) -> String {
        match self.0.char_indices().nth(EXCERPT_LENGTH) {
            Some((cut, _)) => format!("{}...", &self.0[..cut]),
            None => self.0.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert!(ArticleTitle::parse("Why Rust").is_ok());
        assert_eq!(ArticleTitle::parse("ab").unwrap_err().code(), "Title.TooShort");
        assert_eq!(
            ArticleTitle::parse(&"t".repeat(201)).unwrap_err().code(),
            "Title.TooLong"
        );
    }

    #[test]
    fn test_content_bounds() {
        assert_eq!(ArticleContent::parse("short").unwrap_err().code(), "Content.TooShort");
        assert!(ArticleContent::parse(&"c".repeat(10_000)).is_ok());
    }

    #[test]
    fn test_excerpt() {
        let short = ArticleContent::parse("valid content here").unwrap();
        assert_eq!(short.excerpt(), "valid content here");

        let long = ArticleContent::parse(&"é".repeat(600)).unwrap();
        let excerpt = long.excerpt();
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), EXCERPT_LENGTH + 3);
    }
}
