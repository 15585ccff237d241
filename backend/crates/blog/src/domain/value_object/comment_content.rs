use kernel::validation::TextRule;

pub const COMMENT_CONTENT: TextRule = TextRule::new("Content", "Content", 10, 1_000);

bounded_text!(
    /// Comment body, 10 to 1 000 characters
    CommentContent => COMMENT_CONTENT
);
