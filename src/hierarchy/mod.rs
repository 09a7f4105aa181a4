//! Contribution layers and the dynamic inheritance queries.
//!
//! Three kinds of layers contribute templates, each owning a map from
//! canonical identifier to its definition:
//!
//! 1. **Theme layers** - per-theme application overrides; only the theme slug
//!    passed at query time is consulted
//! 2. **The application layer** - overrides shipped with the embedding
//!    application
//! 3. **Package layers** - defaults and overrides shipped by
//!    independently-loaded packages, in registration order
//!
//! [`TemplateHierarchy`] concatenates these into one ordered chain per
//! identifier: theme link first, then application, then packages in *reverse*
//! registration order, so the most specific contributor wins and, among
//! packages, the one loaded last (closest to the final composition) wins.
//! This is the same precedence rule the surrounding system applies to asset
//! and configuration overriding in general.
//!
//! The chain table is built lazily and memoized per generation: replacing any
//! layer's map empties the memo cell, and the next query rebuilds the table
//! in full before swapping it in. Compile passes therefore always observe a
//! complete, consistent table.

mod table;

pub use table::ChainLink;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::error::{CascadeError, Result, closest_match};
use crate::names::{Namespace, identifier};
use table::HierarchyTable;

/// A single template definition contributed by one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Short name as the contributor spells it, suffix included.
    pub short_name: String,
    /// Absolute path of the defining source file.
    pub source_path: PathBuf,
}

/// Canonical identifier → contribution, one map per contributing layer.
///
/// `BTreeMap` keeps iteration deterministic, which makes table rebuilds from
/// identical maps yield identical chains.
pub type ContributionMap = BTreeMap<String, Contribution>;

/// The override cascade across application, theme, and package templates.
///
/// The external template loader hands each layer's contribution map to this
/// type whenever that layer changes (a theme is swapped, a package set is
/// recomposed); compile passes then query [`get_dynamic_parent`] and
/// [`get_first`] against the resulting chains.
///
/// [`get_dynamic_parent`]: TemplateHierarchy::get_dynamic_parent
/// [`get_first`]: TemplateHierarchy::get_first
#[derive(Debug, Default)]
pub struct TemplateHierarchy {
    application: ContributionMap,
    themes: BTreeMap<String, ContributionMap>,
    /// Package layers in registration order.
    packages: Vec<(String, ContributionMap)>,
    /// Memoized chain table; vacant means stale.
    table: OnceLock<HierarchyTable>,
}

impl TemplateHierarchy {
    /// Create an empty hierarchy with no contributions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the application layer's contribution map.
    pub fn set_application_templates(&mut self, templates: ContributionMap) {
        self.application = templates;
        self.invalidate();
    }

    /// Replace the contribution map of the theme named by `theme_slug`.
    ///
    /// Any number of themes may be registered simultaneously; a chain only
    /// contains the link of the theme whose slug is passed at query time.
    pub fn set_theme_templates(&mut self, templates: ContributionMap, theme_slug: &str) {
        self.themes.insert(theme_slug.to_string(), templates);
        self.invalidate();
    }

    /// Replace one package's contribution map.
    ///
    /// A package re-registered under a name seen before keeps its original
    /// position in load order; a new name appends. Load order feeds chain
    /// precedence, so re-deriving the same configuration yields the same
    /// chains.
    pub fn set_package_templates(&mut self, templates: ContributionMap, package_name: &str) {
        match self.packages.iter_mut().find(|(name, _)| name == package_name) {
            Some(entry) => entry.1 = templates,
            None => self.packages.push((package_name.to_string(), templates)),
        }
        self.invalidate();
    }

    /// Resolve the next link after `source_path` in `name`'s chain.
    ///
    /// `name` may be a short name, a suffixed variant, or a namespaced
    /// reference; it is canonicalized first. If `source_path` occurs in the
    /// chain at position *i*, the reference at *i + 1* is returned. A source
    /// path that is not part of the chain at all gets the chain head - such a
    /// file is an effective top-level consumer, not an override.
    ///
    /// # Errors
    ///
    /// [`CascadeError::UnknownIdentifier`] when nothing defines the
    /// identifier under `theme`; [`CascadeError::ChainExhausted`] when
    /// `source_path` is the chain's last link.
    pub fn get_dynamic_parent(
        &self,
        name: &str,
        source_path: &Path,
        theme: Option<&str>,
    ) -> Result<String> {
        let identifier = identifier(name);
        let links = self.chain_links(&identifier, theme)?;

        let next = match links.iter().position(|link| link.source_path.as_path() == source_path) {
            Some(index) => links.get(index + 1).copied().ok_or_else(|| CascadeError::ChainExhausted {
                identifier: identifier.clone(),
                source_path: source_path.to_path_buf(),
            })?,
            None => links[0],
        };

        trace!(
            identifier = %identifier,
            source = %source_path.display(),
            parent = %next.reference,
            "resolved dynamic parent"
        );
        Ok(next.reference.clone())
    }

    /// Resolve `name` to the head of its chain: the most specific override.
    ///
    /// # Errors
    ///
    /// [`CascadeError::UnknownIdentifier`] when nothing defines the
    /// identifier under `theme`.
    pub fn get_first(&self, name: &str, theme: Option<&str>) -> Result<String> {
        let identifier = identifier(name);
        let links = self.chain_links(&identifier, theme)?;
        Ok(links[0].reference.clone())
    }

    /// Snapshot of every identifier's chain under `theme`.
    ///
    /// Read-only inspection surface for tooling and diagnostics; the ordering
    /// is exactly what the query path uses. Identifiers whose only
    /// definitions live in out-of-scope themes are omitted.
    pub fn chains(&self, theme: Option<&str>) -> BTreeMap<String, Vec<ChainLink>> {
        self.table()
            .iter()
            .filter_map(|(identifier, layered)| {
                let links: Vec<ChainLink> =
                    layered.links(theme).into_iter().cloned().collect();
                if links.is_empty() {
                    None
                } else {
                    Some((identifier.to_string(), links))
                }
            })
            .collect()
    }

    fn chain_links(&self, identifier: &str, theme: Option<&str>) -> Result<Vec<&ChainLink>> {
        let table = self.table();
        let links = table
            .get(identifier)
            .map(|layered| layered.links(theme))
            .unwrap_or_default();

        if links.is_empty() {
            return Err(CascadeError::UnknownIdentifier {
                identifier: identifier.to_string(),
                suggestion: closest_match(identifier, table.identifiers()),
            });
        }
        Ok(links)
    }

    /// The memoized table, built now if the generation changed.
    fn table(&self) -> &HierarchyTable {
        self.table.get_or_init(|| self.build_table())
    }

    fn invalidate(&mut self) {
        self.table.take();
    }

    /// Build the chain table from all contribution layers.
    ///
    /// Theme links land first, then the application link, then package links
    /// in reverse registration order. Each layer defines at most one link per
    /// identifier, so the chain is the straight concatenation with no
    /// deduplication step.
    fn build_table(&self) -> HierarchyTable {
        let mut table = HierarchyTable::default();

        for (slug, templates) in &self.themes {
            let namespace = Namespace::Theme(slug.clone());
            for (identifier, contribution) in templates {
                trace!(identifier = %identifier, namespace = %namespace, "adding theme link");
                table
                    .entry_mut(identifier)
                    .themes
                    .insert(slug.clone(), link(&namespace, contribution));
            }
        }

        for (identifier, contribution) in &self.application {
            trace!(identifier = %identifier, "adding application link");
            table.entry_mut(identifier).application =
                Some(link(&Namespace::Application, contribution));
        }

        for (name, templates) in self.packages.iter().rev() {
            let namespace = Namespace::Package(name.clone());
            for (identifier, contribution) in templates {
                trace!(identifier = %identifier, namespace = %namespace, "adding package link");
                table.entry_mut(identifier).packages.push(link(&namespace, contribution));
            }
        }

        debug!(
            identifiers = table.len(),
            themes = self.themes.len(),
            packages = self.packages.len(),
            "built template hierarchy table"
        );
        table
    }
}

fn link(namespace: &Namespace, contribution: &Contribution) -> ChainLink {
    ChainLink {
        source_path: contribution.source_path.clone(),
        reference: namespace.reference(&contribution.short_name),
    }
}
