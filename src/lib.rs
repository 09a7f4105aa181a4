//! Template override cascade for engines with single inheritance.
//!
//! Most template engines resolve an `extends` or `use` directive against exactly
//! one target per namespace. A composed site, however, wants an *ordered* chain
//! of overrides for the same logical template: the active theme's copy first,
//! then the application's copy, then copies shipped by independently-loaded
//! packages. This crate emulates that chain at compile time by rewriting
//! directive targets to point at the *next* link in the chain rather than a
//! fixed file.
//!
//! # Architecture Overview
//!
//! Resolution is a pure in-memory transform with three moving parts:
//!
//! - [`TemplateHierarchy`] holds one contribution map per layer (application,
//!   each theme, each package) and lazily builds an immutable chain table from
//!   them. Replacing any layer's map invalidates the table; the next query
//!   rebuilds it in full. Precedence is theme > application > packages in
//!   reverse registration order (the last-loaded package wins).
//! - The directive rewrite pass ([`rewrite_directive`]) intercepts `extends`,
//!   `use`, and `include` directives while a template compiles, finds every
//!   literal target in the cascade marker namespace (`@Cascade/...`), asks the
//!   hierarchy for the next link after the compiling file, and overwrites the
//!   literal in place. A caller-owned [`ResolutionLedger`] records each choice
//!   so inheritance cycles fail fast with the full offending chain.
//! - [`try_visit_constants`] walks arbitrary target expressions (ternaries,
//!   concatenations, function calls) to reach every literal without knowing
//!   the host engine's full node vocabulary.
//!
//! # Core Modules
//!
//! - [`core`] - Error taxonomy ([`CascadeError`]) and user-friendly error
//!   contexts with suggestions
//! - [`names`] - Identifier canonicalization and namespace derivation
//! - [`hierarchy`] - Contribution layers, chain table construction, and the
//!   `get_dynamic_parent` / `get_first` queries
//! - [`expr`] - Expression-tree abstraction and constant traversal
//! - [`directives`] - The `extends` / `use` / `include` rewrite passes and
//!   per-compile loop detection
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use template_cascade::{Contribution, ContributionMap, TemplateHierarchy};
//!
//! let mut hierarchy = TemplateHierarchy::new();
//!
//! let mut app = ContributionMap::new();
//! app.insert(
//!     "card".to_string(),
//!     Contribution {
//!         short_name: "card.html.twig".to_string(),
//!         source_path: "/app/templates/card.html.twig".into(),
//!     },
//! );
//! hierarchy.set_application_templates(app);
//!
//! let mut blog = ContributionMap::new();
//! blog.insert(
//!     "card".to_string(),
//!     Contribution {
//!         short_name: "card.html.twig".to_string(),
//!         source_path: "/packages/blog/templates/card.html.twig".into(),
//!     },
//! );
//! hierarchy.set_package_templates(blog, "blog");
//!
//! // The application copy heads the chain; compiling it extends the blog copy.
//! let first = hierarchy.get_first("card.html.twig", None).unwrap();
//! assert_eq!(first, "@Cascade_App/card.html.twig");
//!
//! let parent = hierarchy
//!     .get_dynamic_parent("card", Path::new("/app/templates/card.html.twig"), None)
//!     .unwrap();
//! assert_eq!(parent, "@Cascade_blog/card.html.twig");
//! ```
//!
//! # Failure Model
//!
//! Every failure is fatal for the offending directive: an unknown identifier,
//! an exhausted chain, or a detected cycle aborts compilation of that template
//! rather than risking silently mis-rendered content. Inputs are deterministic
//! in-memory maps, so nothing is retried.

pub mod core;
pub mod directives;
pub mod expr;
pub mod hierarchy;
pub mod names;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use crate::core::context::{ErrorContext, user_friendly_error};
pub use crate::core::error::{CascadeError, Result};
pub use crate::directives::{BlockImport, Directive, ResolutionLedger, rewrite_directive};
pub use crate::expr::{Expr, ExprNode, try_visit_constants};
pub use crate::hierarchy::{ChainLink, Contribution, ContributionMap, TemplateHierarchy};
pub use crate::names::{MARKER_NAMESPACE, Namespace, hierarchy_target, identifier};
