//! Integration test suite for template-cascade
//!
//! End-to-end scenarios exercising the public surface the way an embedding
//! template engine would: contribution maps in, rewritten directive targets
//! out.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cascade**: the three-layer override walkthrough (extends/use/include
//!   rewrites, chain exhaustion, runtime theme swap, cycle diagnostics)
//! - **fixtures**: a composed site declared in TOML, deserialized into
//!   contribution maps and resolved

mod cascade;
mod fixtures;

/// Initialize tracing output for debugging test failures.
///
/// Respects `RUST_LOG`; repeated calls are harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
