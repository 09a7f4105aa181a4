//! A composed site declared in TOML.
//!
//! The external loader hands this crate its contribution maps; in the
//! embedding application those maps are derived from configuration. This
//! suite deserializes a representative site description and checks the
//! resulting chains.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use template_cascade::{ContributionMap, TemplateHierarchy};

#[derive(Debug, Deserialize)]
struct SiteFixture {
    #[serde(default)]
    application: ContributionMap,
    #[serde(default)]
    themes: BTreeMap<String, ContributionMap>,
    /// Packages in load order.
    #[serde(default)]
    packages: Vec<PackageFixture>,
}

#[derive(Debug, Deserialize)]
struct PackageFixture {
    name: String,
    templates: ContributionMap,
}

fn load_site() -> TemplateHierarchy {
    let fixture: SiteFixture =
        toml::from_str(include_str!("../fixtures/site.toml")).expect("fixture parses");

    let mut hierarchy = TemplateHierarchy::new();
    hierarchy.set_application_templates(fixture.application);
    for (slug, templates) in fixture.themes {
        hierarchy.set_theme_templates(templates, &slug);
    }
    for package in fixture.packages {
        hierarchy.set_package_templates(package.templates, &package.name);
    }
    hierarchy
}

#[test]
fn test_fixture_chain_precedence() {
    let hierarchy = load_site();

    // card is defined by every layer: theme > application > news > gallery.
    let chains = hierarchy.chains(Some("midnight"));
    let references: Vec<&str> =
        chains["card"].iter().map(|link| link.reference.as_str()).collect();
    assert_eq!(
        references,
        vec![
            "@Cascade_Theme_midnight/card.html.twig",
            "@Cascade_App/card.html.twig",
            "@Cascade_news/card.html.twig",
            "@Cascade_gallery/card.html.twig",
        ]
    );
}

#[test]
fn test_fixture_walks_from_theme_to_last_package() {
    let hierarchy = load_site();

    let steps = [
        ("/site/themes/midnight/templates/card.html.twig", "@Cascade_App/card.html.twig"),
        ("/site/templates/card.html.twig", "@Cascade_news/card.html.twig"),
        ("/vendor/news/templates/card.html.twig", "@Cascade_gallery/card.html.twig"),
    ];
    for (source, expected) in steps {
        let resolved = hierarchy
            .get_dynamic_parent("card", Path::new(source), Some("midnight"))
            .unwrap();
        assert_eq!(resolved, expected);
    }
}

#[test]
fn test_fixture_nested_identifier() {
    let hierarchy = load_site();

    assert_eq!(
        hierarchy.get_first("blocks/hero.html.twig", None).unwrap(),
        "@Cascade_App/blocks/hero.html.twig"
    );
    let parent = hierarchy
        .get_dynamic_parent(
            "blocks/hero",
            Path::new("/site/templates/blocks/hero.html.twig"),
            None,
        )
        .unwrap();
    assert_eq!(parent, "@Cascade_news/blocks/hero.html.twig");
}

#[test]
fn test_fixture_legacy_suffix_contribution() {
    let hierarchy = load_site();

    // lightbox ships only as a legacy .html5 template; both spellings of the
    // name reach it.
    assert_eq!(
        hierarchy.get_first("lightbox.html.twig", None).unwrap(),
        "@Cascade_gallery/lightbox.html5"
    );
    assert_eq!(
        hierarchy.get_first("lightbox", None).unwrap(),
        "@Cascade_gallery/lightbox.html5"
    );
}
