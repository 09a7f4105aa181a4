//! Directive rewrite passes for `extends`, `use`, and `include`.
//!
//! While a template compiles, each inheritance-relevant directive is run
//! through [`rewrite_directive`]: every literal target in the cascade marker
//! namespace is resolved against the hierarchy and overwritten in place with
//! the resulting logical reference, so downstream compilation proceeds
//! exactly as if the template had natively named that reference.
//!
//! The three directive kinds are a closed set dispatched through the single
//! entry point; they share one traversal-resolve-rewrite-check sequence.
//! `use` additionally carries `with <block> as <alias>` pairs, which pass
//! through untouched. `include` participates symmetrically: an include of a
//! marker name resolves through the same chain walk, so a template including
//! itself fails at compile time instead of looping at render time.
//!
//! Loop detection is the caller's [`ResolutionLedger`]: one ledger per
//! compile pass, handed into every rewrite of that pass and discarded with
//! it. The ledger records each reference chosen per identifier; choosing one
//! twice is a cycle and aborts compilation with the full offending chain.


use std::collections::BTreeMap;
use std::path::Path;

use tracing::trace;

use crate::core::error::{CascadeError, Result};
use crate::expr::{Expr, try_visit_constants};
use crate::hierarchy::TemplateHierarchy;
use crate::names::{hierarchy_target, identifier};

/// One `with <block> as <alias>` pair on a `use` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockImport {
    /// Name of the block being imported.
    pub block: String,
    /// Alias it is imported under, when one is declared.
    pub alias: Option<String>,
}

/// The directive kinds that participate in dynamic inheritance.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `extends <target>`
    Extends { target: Expr },
    /// `use <target> [with <block> as <alias>, ...]`
    Use { target: Expr, imports: Vec<BlockImport> },
    /// `include <target>`
    Include { target: Expr },
}

impl Directive {
    fn target_mut(&mut self) -> &mut Expr {
        match self {
            Self::Extends { target } => target,
            // Block imports pass through untouched; only the target is dynamic.
            Self::Use { target, .. } => target,
            Self::Include { target } => target,
        }
    }
}

/// Per-compile record of the logical references already chosen per identifier.
///
/// Owned by the caller and threaded explicitly into [`rewrite_directive`]:
/// one ledger spans exactly one compile of one template source file, and is
/// never shared across compiles.
#[derive(Debug, Default)]
pub struct ResolutionLedger {
    chosen: BTreeMap<String, Vec<String>>,
}

impl ResolutionLedger {
    /// Create an empty ledger for one compile pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// References chosen so far for `identifier`, in resolution order.
    pub fn chosen(&self, identifier: &str) -> &[String] {
        self.chosen.get(identifier).map_or(&[], Vec::as_slice)
    }

    /// Record `reference` as chosen for `identifier`, rejecting repeats.
    fn record(&mut self, identifier: &str, reference: &str) -> Result<()> {
        let chosen = self.chosen.entry(identifier.to_string()).or_default();
        if chosen.iter().any(|seen| seen == reference) {
            let mut chain = chosen.clone();
            chain.push(reference.to_string());
            return Err(CascadeError::InheritanceCycle {
                identifier: identifier.to_string(),
                chain,
            });
        }
        chosen.push(reference.to_string());
        Ok(())
    }
}

/// Rewrite one directive of the template at `source_path`.
///
/// Traverses the directive's target expression; every literal sub-node
/// carrying the marker namespace is resolved via
/// [`TemplateHierarchy::get_dynamic_parent`], checked against the ledger, and
/// overwritten in place. Literals outside the marker namespace, and
/// non-literal sub-expressions, are left alone.
///
/// # Errors
///
/// Any resolution failure - unknown identifier, exhausted chain, or a cycle -
/// is fatal for this compile and comes back wrapped in
/// [`CascadeError::DirectiveRewrite`] naming `source_path`.
pub fn rewrite_directive(
    hierarchy: &TemplateHierarchy,
    directive: &mut Directive,
    source_path: &Path,
    theme: Option<&str>,
    ledger: &mut ResolutionLedger,
) -> Result<()> {
    rewrite_target(hierarchy, directive.target_mut(), source_path, theme, ledger).map_err(
        |source| CascadeError::DirectiveRewrite {
            template: source_path.to_path_buf(),
            source: Box::new(source),
        },
    )
}

fn rewrite_target(
    hierarchy: &TemplateHierarchy,
    target: &mut Expr,
    source_path: &Path,
    theme: Option<&str>,
    ledger: &mut ResolutionLedger,
) -> Result<()> {
    try_visit_constants(target, &mut |value| {
        let Some(short_name) = hierarchy_target(value) else {
            return Ok(());
        };
        let identifier = identifier(short_name);
        let reference = hierarchy.get_dynamic_parent(short_name, source_path, theme)?;
        ledger.record(&identifier, &reference)?;

        trace!(
            identifier = %identifier,
            source = %source_path.display(),
            reference = %reference,
            "rewrote directive target"
        );
        *value = reference;
        Ok(())
    })
}
