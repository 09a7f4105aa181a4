//! The built chain table for one generation of contribution maps.
//!
//! A table is derived state: computed in full from the contribution layers,
//! consumed read-only by every compile pass of the generation, and thrown
//! away wholesale when any layer is replaced. It is never patched in place.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// One link in an identifier's override chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainLink {
    /// Absolute path of the source file that defines this link.
    pub source_path: PathBuf,
    /// Logical reference the engine's loader resolves to that file.
    pub reference: String,
}

/// Links for one identifier, kept per layer.
///
/// Theme links are stored for every registered theme; which one (if any)
/// participates in a chain is decided by the slug passed at query time.
#[derive(Debug, Default, Clone)]
pub(crate) struct LayeredLinks {
    /// Theme overrides, keyed by theme slug.
    pub(crate) themes: BTreeMap<String, ChainLink>,
    /// The application-level override.
    pub(crate) application: Option<ChainLink>,
    /// Package overrides in reverse registration order: the last-registered
    /// package's link comes first.
    pub(crate) packages: Vec<ChainLink>,
}

impl LayeredLinks {
    /// The ordered chain for this identifier under `theme`.
    ///
    /// Empty when no participating layer defines the identifier, e.g. when it
    /// exists only in a theme that is not in scope.
    pub(crate) fn links(&self, theme: Option<&str>) -> Vec<&ChainLink> {
        let mut links = Vec::with_capacity(2 + self.packages.len());
        if let Some(slug) = theme {
            links.extend(self.themes.get(slug));
        }
        links.extend(self.application.as_ref());
        links.extend(self.packages.iter());
        links
    }
}

/// Identifier → layered links, built once per generation.
#[derive(Debug, Default)]
pub(crate) struct HierarchyTable {
    entries: BTreeMap<String, LayeredLinks>,
}

impl HierarchyTable {
    pub(crate) fn entry_mut(&mut self, identifier: &str) -> &mut LayeredLinks {
        self.entries.entry(identifier.to_string()).or_default()
    }

    pub(crate) fn get(&self, identifier: &str) -> Option<&LayeredLinks> {
        self.entries.get(identifier)
    }

    pub(crate) fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &LayeredLinks)> {
        self.entries.iter().map(|(identifier, links)| (identifier.as_str(), links))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
