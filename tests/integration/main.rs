//! Cross-layer integration tests for Mapline
//!
//! Tests that verify correct interaction between multiple crates.
//!
//! Set `RUST_LOG=mapline_mapping=debug,mapline_query=debug` to see discovery
//! and derivation logs while running these tests.

mod concurrency;
mod repository_methods;

/// Routes `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
