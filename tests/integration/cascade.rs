//! End-to-end cascade scenarios.

use std::path::Path;

use template_cascade::test_utils::{HierarchyBuilder, contribution_map};
use template_cascade::{
    CascadeError, Directive, Expr, ResolutionLedger, TemplateHierarchy, rewrite_directive,
    user_friendly_error,
};

use crate::init_tracing;

fn composed_site() -> TemplateHierarchy {
    HierarchyBuilder::new()
        .package("pkg_foo", &[("card", "card.html.twig", "/pkgFoo/card.html.twig")])
        .package("pkg_bar", &[("card", "card.html.twig", "/pkgBar/card.html.twig")])
        .application(&[("card", "card.html.twig", "/app/card.html.twig")])
        .build()
}

fn extends(target: &str) -> Directive {
    Directive::Extends { target: Expr::constant(target) }
}

fn rewritten_target(directive: &Directive) -> &str {
    let (Directive::Extends { target }
    | Directive::Use { target, .. }
    | Directive::Include { target }) = directive;
    match target {
        Expr::Constant(value) => value,
        other => panic!("expected a constant target, got {other:?}"),
    }
}

/// The full walkthrough: each layer's copy extends the next link until the
/// chain runs out.
#[test]
fn test_override_chain_walkthrough() {
    init_tracing();
    let hierarchy = composed_site();

    // The chain is app -> pkg_bar -> pkg_foo (later-loaded package first).
    let expected = [
        ("/app/card.html.twig", "@Cascade_pkg_bar/card.html.twig"),
        ("/pkgBar/card.html.twig", "@Cascade_pkg_foo/card.html.twig"),
    ];
    for (source, parent) in expected {
        let mut ledger = ResolutionLedger::new();
        let mut directive = extends("@Cascade/card.html.twig");
        rewrite_directive(&hierarchy, &mut directive, Path::new(source), None, &mut ledger)
            .unwrap();
        assert_eq!(rewritten_target(&directive), parent);
    }

    // The last link has nothing left to extend.
    let mut ledger = ResolutionLedger::new();
    let mut directive = extends("@Cascade/card.html.twig");
    let error = rewrite_directive(
        &hierarchy,
        &mut directive,
        Path::new("/pkgFoo/card.html.twig"),
        None,
        &mut ledger,
    )
    .unwrap_err();
    assert!(matches!(error.root(), CascadeError::ChainExhausted { .. }));
}

/// Swapping the active theme at runtime is a contribution replacement: the
/// table is rebuilt on the next query and chains pick up the new layer.
#[test]
fn test_runtime_theme_swap_rebuilds_chains() {
    init_tracing();
    let mut hierarchy = composed_site();

    assert_eq!(hierarchy.get_first("card", None).unwrap(), "@Cascade_App/card.html.twig");
    assert_eq!(
        hierarchy.get_first("card", Some("midnight")).unwrap(),
        "@Cascade_App/card.html.twig"
    );

    hierarchy.set_theme_templates(
        contribution_map(&[("card", "card.html.twig", "/themes/midnight/card.html.twig")]),
        "midnight",
    );

    assert_eq!(
        hierarchy.get_first("card", Some("midnight")).unwrap(),
        "@Cascade_Theme_midnight/card.html.twig"
    );
    // The theme's copy now heads the chain; its parent is the application's.
    let parent = hierarchy
        .get_dynamic_parent("card", Path::new("/themes/midnight/card.html.twig"), Some("midnight"))
        .unwrap();
    assert_eq!(parent, "@Cascade_App/card.html.twig");
}

/// `use` and `include` run the same resolution as `extends`.
#[test]
fn test_use_and_include_resolve_like_extends() {
    let hierarchy = composed_site();

    let mut ledger = ResolutionLedger::new();
    let mut use_directive = Directive::Use {
        target: Expr::constant("@Cascade/card.html.twig"),
        imports: vec![],
    };
    rewrite_directive(
        &hierarchy,
        &mut use_directive,
        Path::new("/app/card.html.twig"),
        None,
        &mut ledger,
    )
    .unwrap();
    assert_eq!(rewritten_target(&use_directive), "@Cascade_pkg_bar/card.html.twig");

    let mut ledger = ResolutionLedger::new();
    let mut include_directive =
        Directive::Include { target: Expr::constant("@Cascade/card.html.twig") };
    rewrite_directive(
        &hierarchy,
        &mut include_directive,
        Path::new("/app/card.html.twig"),
        None,
        &mut ledger,
    )
    .unwrap();
    assert_eq!(rewritten_target(&include_directive), "@Cascade_pkg_bar/card.html.twig");
}

/// Chains are observable as data, and serialize stably for tooling.
#[test]
fn test_chain_snapshot() {
    let hierarchy = composed_site();
    let chains = hierarchy.chains(None);

    let snapshot = serde_json::to_value(&chains).unwrap();
    assert_eq!(
        snapshot,
        serde_json::json!({
            "card": [
                {
                    "source_path": "/app/card.html.twig",
                    "reference": "@Cascade_App/card.html.twig"
                },
                {
                    "source_path": "/pkgBar/card.html.twig",
                    "reference": "@Cascade_pkg_bar/card.html.twig"
                },
                {
                    "source_path": "/pkgFoo/card.html.twig",
                    "reference": "@Cascade_pkg_foo/card.html.twig"
                }
            ]
        })
    );
}

/// The developer-facing error surface carries actionable guidance.
#[test]
fn test_unknown_identifier_is_reported_with_guidance() {
    let hierarchy = composed_site();
    let mut ledger = ResolutionLedger::new();
    let mut directive = extends("@Cascade/cart.html.twig");

    let error = rewrite_directive(
        &hierarchy,
        &mut directive,
        Path::new("/app/card.html.twig"),
        None,
        &mut ledger,
    )
    .unwrap_err();

    let context = user_friendly_error(error);
    assert_eq!(context.suggestion.as_deref(), Some("Did you mean 'card'?"));
    let rendered = context.to_string();
    assert!(rendered.contains("/app/card.html.twig"));
    assert!(rendered.contains("cart"));
}

/// A cycle aborts with the whole offending chain in the message.
#[test]
fn test_cycle_diagnostic_prints_chain() {
    let hierarchy = HierarchyBuilder::new()
        .application(&[("card", "card.html.twig", "/app/card.html.twig")])
        .build();
    let mut ledger = ResolutionLedger::new();

    let mut first = extends("@Cascade/card.html.twig");
    rewrite_directive(
        &hierarchy,
        &mut first,
        Path::new("/detached/one.html.twig"),
        None,
        &mut ledger,
    )
    .unwrap();

    let mut second = extends("@Cascade/card.html.twig");
    let error = rewrite_directive(
        &hierarchy,
        &mut second,
        Path::new("/detached/two.html.twig"),
        None,
        &mut ledger,
    )
    .unwrap_err();

    let message = error.to_string();
    assert!(
        message.contains("@Cascade_App/card.html.twig -> @Cascade_App/card.html.twig"),
        "diagnostic must include the full chain, got: {message}"
    );
}
