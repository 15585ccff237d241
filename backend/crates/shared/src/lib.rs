//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - The failure taxonomy ([`error::kind::ErrorKind`], [`error::app_error::AppError`])
//! - The aggregated result type ([`error::error_list::Outcome`])
//! - Typed entity IDs
//! - Cross-cutting field rules and the validation pipeline that gates
//!   every command and query
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod error_list;
    pub mod kind;
}
pub mod id;
pub mod validation;
