//! Core types for the cascade resolver.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`CascadeError`]) for precise handling in code
//! 2. **User-friendly contexts** ([`ErrorContext`]) with actionable suggestions
//!    for the embedding application's CLI surface
//!
//! Every failure in this subsystem is fatal for the offending directive or
//! compile pass: template inheritance errors that silently mis-render content
//! are considered worse than a hard failure, so nothing here is retried or
//! recovered from. [`user_friendly_error`] maps each variant to a suggestion a
//! developer can act on, including a nearest-match hint for misspelled
//! identifiers.

pub mod context;
pub mod error;

pub use context::{ErrorContext, user_friendly_error};
pub use error::{CascadeError, Result};
