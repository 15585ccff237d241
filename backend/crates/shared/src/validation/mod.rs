//! Validation
//!
//! - [`field`] - reusable single-field rules (required text, bounded length, ids)
//! - [`pipeline`] - per-request rule registration and the dispatch gate

pub mod field;
pub mod pipeline;

pub use field::{TextRule, require_id, require_range};
pub use pipeline::{FieldRule, Handler, LocalHandler, Request, ValidationPipeline, validate};
