//! Template name canonicalization and namespace derivation.
//!
//! Every override target is addressed by a *canonical identifier*: the short
//! name with any recognized template suffix removed, so that variants like
//! `card.html.twig` and `card.html5` collapse onto the same chain. Namespaces
//! are derived deterministically from contributor identity, and the
//! cross-cutting [`MARKER_NAMESPACE`] marks a directive target as
//! participating in the cascade rather than naming a concrete file.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The cross-cutting namespace that opts a directive target into dynamic
/// resolution.
///
/// A target written as `@Cascade/<name>` is rewritten at compile time to the
/// appropriate link of `<name>`'s override chain. Targets in any other
/// namespace (or with no namespace) pass through untouched.
pub const MARKER_NAMESPACE: &str = "@Cascade";

/// Recognized template suffixes, stripped during canonicalization.
fn template_suffix() -> &'static Regex {
    static TEMPLATE_SUFFIX: OnceLock<Regex> = OnceLock::new();
    TEMPLATE_SUFFIX
        .get_or_init(|| Regex::new(r"(\.html\.twig|\.html5)$").expect("suffix pattern is valid"))
}

/// Canonical identifier for a template name.
///
/// Strips an optional leading `@<namespace>/` segment, then one recognized
/// suffix. Total: names with no namespace and no recognized suffix come back
/// unchanged.
///
/// # Examples
///
/// ```rust
/// use template_cascade::identifier;
///
/// assert_eq!(identifier("card.html.twig"), "card");
/// assert_eq!(identifier("card.html5"), "card");
/// assert_eq!(identifier("@Cascade_App/blocks/card.html.twig"), "blocks/card");
/// assert_eq!(identifier("card"), "card");
/// ```
pub fn identifier(name: &str) -> String {
    let bare = strip_namespace(name);
    template_suffix().replace(bare, "").into_owned()
}

/// Short name addressed through the cascade marker namespace, if any.
///
/// Returns `Some(short_name)` for `@Cascade/<short_name>` targets and `None`
/// for everything else, including bare names and other namespaces.
pub fn hierarchy_target(target: &str) -> Option<&str> {
    target
        .strip_prefix(MARKER_NAMESPACE)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|short_name| !short_name.is_empty())
}

fn strip_namespace(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('@') {
        if let Some((_, tail)) = rest.split_once('/') {
            return tail;
        }
    }
    name
}

/// Identity of a contributing layer, rendered as the engine-facing namespace.
///
/// The rendering is deterministic so that rebuilding a chain table from the
/// same contribution maps always yields the same logical references. Theme
/// slugs and package names are sanitized to `[A-Za-z0-9_]` before embedding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Namespace {
    /// Application-level overrides shipped with the embedding application.
    Application,
    /// Overrides belonging to one named visual theme.
    Theme(String),
    /// Overrides shipped by an independently-loaded package.
    Package(String),
}

impl Namespace {
    /// Logical reference for `short_name` under this namespace, in the
    /// `<namespace>/<short_name>` shape the engine's loader resolves.
    pub fn reference(&self, short_name: &str) -> String {
        format!("{self}/{short_name}")
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Application => write!(f, "{MARKER_NAMESPACE}_App"),
            Self::Theme(slug) => write!(f, "{MARKER_NAMESPACE}_Theme_{}", sanitize(slug)),
            Self::Package(name) => write!(f, "{MARKER_NAMESPACE}_{}", sanitize(name)),
        }
    }
}

/// Namespace-safe fragment: every char outside `[A-Za-z0-9_]` becomes `_`.
fn sanitize(raw: &str) -> String {
    raw.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect()
}
