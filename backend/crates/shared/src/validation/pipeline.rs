//! Validation Pipeline
//!
//! Every command or query declares its ordered [`FieldRule`] list at
//! compile time through [`Request::RULES`]. [`ValidationPipeline`] runs the
//! whole list before the handler:
//!
//! ```text
//! Received ──validate──┬── no errors ──> Dispatched (handler runs once, Outcome returned as-is)
//!                      └── errors ─────> Rejected   (handler skipped, every error returned)
//! ```
//!
//! Rules are pure and independent, so their execution order does not
//! matter; the reported order is always declaration order. Checks that
//! need stored state (uniqueness, existence) stay in the handler.

use crate::error::app_error::AppResult;
use crate::error::error_list::{ErrorList, Outcome};

/// One statically registered rule: a field name and a pure check
pub struct FieldRule<R> {
    field: &'static str,
    check: fn(&R) -> AppResult<()>,
}

impl<R> FieldRule<R> {
    pub const fn new(field: &'static str, check: fn(&R) -> AppResult<()>) -> Self {
        Self { field, check }
    }

    pub const fn field(&self) -> &'static str {
        self.field
    }

    #[inline]
    pub fn apply(&self, request: &R) -> AppResult<()> {
        (self.check)(request)
    }
}

/// A command or query that can pass through the pipeline
///
/// ## Examples
/// ```rust
/// use kernel::validation::{FieldRule, Request, TextRule, validate};
///
/// const TITLE: TextRule = TextRule::new("Title", "Title", 3, 200);
///
/// struct Rename {
///     title: String,
/// }
///
/// impl Request for Rename {
///     type Response = ();
///     const NAME: &'static str = "Rename";
///     const RULES: &'static [FieldRule<Self>] =
///         &[FieldRule::new("Title", |r: &Self| TITLE.check(&r.title).map(drop))];
/// }
///
/// let errors = validate(&Rename { title: String::new() }).unwrap_err();
/// assert_eq!(errors.codes(), vec!["Title.Empty"]);
/// ```
pub trait Request: Sized + Send + 'static {
    /// Value produced by the handler on success
    type Response;

    /// Name used in logs
    const NAME: &'static str;

    /// Rules in declaration order
    const RULES: &'static [FieldRule<Self>];
}

/// Handler invoked only for requests that passed validation
#[trait_variant::make(Handler: Send)]
pub trait LocalHandler<R: Request> {
    async fn handle(&self, request: R) -> Outcome<R::Response>;
}

/// Runs every rule of `R` and keeps every failure in declaration order.
pub fn validate<R: Request>(request: &R) -> Outcome<()> {
    let errors = R::RULES
        .iter()
        .filter_map(|rule| rule.apply(request).err())
        .collect();

    match ErrorList::from_vec(errors) {
        Some(errors) => Err(errors),
        None => Ok(()),
    }
}

/// Gate in front of a handler
pub struct ValidationPipeline<H> {
    inner: H,
}

impl<H> ValidationPipeline<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Validates `request`; on success calls the handler exactly once and
    /// returns its outcome unchanged, otherwise returns the aggregated
    /// failures without calling it.
    pub async fn dispatch<R>(&self, request: R) -> Outcome<R::Response>
    where
        R: Request,
        H: Handler<R>,
    {
        if let Err(errors) = validate(&request) {
            tracing::info!(
                request = R::NAME,
                error_count = errors.len(),
                codes = ?errors.codes(),
                "Request rejected by validation"
            );
            return Err(errors);
        }

        tracing::debug!(request = R::NAME, "Request dispatched");
        self.inner.handle(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::app_error::AppError;
    use crate::validation::field::TextRule;

    const TITLE: TextRule = TextRule::new("Title", "Title", 3, 200);
    const CONTENT: TextRule = TextRule::new("Content", "Content", 10, 10_000);

    struct CreatePost {
        title: String,
        content: String,
    }

    impl Request for CreatePost {
        type Response = String;
        const NAME: &'static str = "CreatePost";
        const RULES: &'static [FieldRule<Self>] = &[
            FieldRule::new("Title", |r: &Self| TITLE.check(&r.title).map(drop)),
            FieldRule::new("Content", |r: &Self| CONTENT.check(&r.content).map(drop)),
        ];
    }

    fn post(title: &str, content: &str) -> CreatePost {
        CreatePost {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[derive(Default)]
    struct CountingHandler {
        calls: AtomicUsize,
    }

    impl Handler<CreatePost> for CountingHandler {
        async fn handle(&self, request: CreatePost) -> Outcome<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(request.title)
        }
    }

    struct ConflictHandler;

    impl Handler<CreatePost> for ConflictHandler {
        async fn handle(&self, _request: CreatePost) -> Outcome<String> {
            Err(AppError::conflict("Post.Duplicate", "Duplicate post.").into())
        }
    }

    #[test]
    fn test_rule_field_names() {
        let fields: Vec<_> = CreatePost::RULES.iter().map(FieldRule::field).collect();
        assert_eq!(fields, vec!["Title", "Content"]);
    }

    #[test]
    fn test_validate_passes() {
        assert!(validate(&post("Hello", "valid content here")).is_ok());
    }

    #[tokio::test]
    async fn test_single_failure_skips_handler() {
        let pipeline = ValidationPipeline::new(CountingHandler::default());

        let errors = pipeline
            .dispatch(post("", "valid content here"))
            .await
            .unwrap_err();

        assert_eq!(errors.codes(), vec!["Title.Empty"]);
        assert_eq!(pipeline.inner().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_all_failures_in_declaration_order() {
        let pipeline = ValidationPipeline::new(CountingHandler::default());

        let errors = pipeline.dispatch(post("ab", "short")).await.unwrap_err();

        assert_eq!(errors.codes(), vec!["Title.TooShort", "Content.TooShort"]);
        assert_eq!(pipeline.inner().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_request_dispatches_once() {
        let pipeline = ValidationPipeline::new(CountingHandler::default());

        let title = pipeline
            .dispatch(post("Hello", "valid content here"))
            .await
            .unwrap();

        assert_eq!(title, "Hello");
        assert_eq!(pipeline.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handler_outcome_is_returned_unchanged() {
        let pipeline = ValidationPipeline::new(ConflictHandler);

        let errors = pipeline
            .dispatch(post("Hello", "valid content here"))
            .await
            .unwrap_err();

        assert_eq!(errors.codes(), vec!["Post.Duplicate"]);
    }
}
