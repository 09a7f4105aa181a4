//! Shared fixtures for unit and integration tests.
//!
//! Available to integration tests through the `test-utils` feature (the crate
//! depends on itself in `dev-dependencies` with the feature enabled).

use std::path::PathBuf;

use crate::hierarchy::{Contribution, ContributionMap, TemplateHierarchy};

/// Build a contribution map from `(identifier, short_name, source_path)`
/// triples.
pub fn contribution_map(entries: &[(&str, &str, &str)]) -> ContributionMap {
    entries
        .iter()
        .map(|(identifier, short_name, source_path)| {
            (
                (*identifier).to_string(),
                Contribution {
                    short_name: (*short_name).to_string(),
                    source_path: PathBuf::from(source_path),
                },
            )
        })
        .collect()
}

/// Fluent construction of a [`TemplateHierarchy`] for tests.
///
/// Layers are registered in call order, which matters for packages: the
/// later `package()` call registers the later-loaded (higher-precedence)
/// package.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    hierarchy: TemplateHierarchy,
}

impl HierarchyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn application(mut self, entries: &[(&str, &str, &str)]) -> Self {
        self.hierarchy.set_application_templates(contribution_map(entries));
        self
    }

    #[must_use]
    pub fn theme(mut self, slug: &str, entries: &[(&str, &str, &str)]) -> Self {
        self.hierarchy.set_theme_templates(contribution_map(entries), slug);
        self
    }

    #[must_use]
    pub fn package(mut self, name: &str, entries: &[(&str, &str, &str)]) -> Self {
        self.hierarchy.set_package_templates(contribution_map(entries), name);
        self
    }

    #[must_use]
    pub fn build(self) -> TemplateHierarchy {
        self.hierarchy
    }
}
