//! Error types for cascade resolution.
//!
//! Four failure modes exist, all fatal for the directive being compiled:
//!
//! - [`CascadeError::UnknownIdentifier`] - no layer has ever registered the
//!   identifier
//! - [`CascadeError::ChainExhausted`] - the compiling file is the last link
//!   and tries to extend further
//! - [`CascadeError::InheritanceCycle`] - resolving a link would revisit a
//!   reference already chosen for this identifier in the same compile pass;
//!   the error carries the *whole* offending chain, since a bare "cycle
//!   detected" is useless to a developer working across several packages
//! - [`CascadeError::DirectiveRewrite`] - wrapper identifying the template
//!   whose directive could not be rewritten

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`CascadeError`].
pub type Result<T> = std::result::Result<T, CascadeError>;

/// Maximum allowed Levenshtein distance as a percentage of target length for
/// suggestions. This represents a 50% similarity threshold for identifier
/// suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Errors raised while resolving or rewriting template inheritance.
#[derive(Debug, Error)]
pub enum CascadeError {
    /// A directive references an identifier for which no layer has registered
    /// a contribution.
    #[error("unknown template identifier '{identifier}'")]
    UnknownIdentifier {
        /// The canonical identifier that was looked up.
        identifier: String,
        /// Closest registered identifier, if one is similar enough.
        suggestion: Option<String>,
    },

    /// The compiling source file is the last link of the chain; there is
    /// nothing left to extend.
    #[error(
        "template '{}' is the last link in the chain for '{identifier}'; nothing left to extend",
        .source_path.display()
    )]
    ChainExhausted {
        /// The canonical identifier whose chain ran out.
        identifier: String,
        /// The source file sitting at the end of the chain.
        source_path: PathBuf,
    },

    /// Resolving a link would revisit a logical reference already chosen for
    /// this identifier during the current compile pass.
    #[error(
        "inheritance cycle detected for template '{identifier}': {}",
        .chain.join(" -> ")
    )]
    InheritanceCycle {
        /// The canonical identifier being resolved.
        identifier: String,
        /// Every reference chosen so far, ending with the repeated one.
        chain: Vec<String>,
    },

    /// A directive of the named template could not be rewritten.
    #[error("failed to rewrite directive in '{}': {source}", .template.display())]
    DirectiveRewrite {
        /// Path of the template being compiled.
        template: PathBuf,
        /// The underlying resolution failure.
        #[source]
        source: Box<CascadeError>,
    },
}

impl CascadeError {
    /// Unwraps [`CascadeError::DirectiveRewrite`] layers down to the root
    /// resolution failure.
    pub fn root(&self) -> &CascadeError {
        match self {
            Self::DirectiveRewrite { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Closest candidate to `wanted` within the similarity threshold.
///
/// Used to attach a "did you mean" hint to [`CascadeError::UnknownIdentifier`].
pub(crate) fn closest_match<'a>(
    wanted: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<String> {
    let max_distance = wanted.len() * SIMILARITY_THRESHOLD_PERCENT / 100;
    candidates
        .into_iter()
        .map(|candidate| (strsim::levenshtein(wanted, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.to_string())
}
