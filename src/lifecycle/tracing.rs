//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Catalog**: loads, skipped records, merged listings
//! - **Broadcaster**: subscriptions, publish passes, subscriber failures
//! - **Search**: strategy and query changes, filter hit counts (debug)
//!
//! ```bash
//! # Loads, merges and publish summaries
//! RUST_LOG=info cargo run
//!
//! # Also every query change and normalized record
//! RUST_LOG=debug cargo run
//!
//! # Only the search layer
//! RUST_LOG=textbook_exchange::search=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a publish looks like:
//!
//! ```text
//! INFO Listing added id="listing_1" size=4
//! INFO Published delivered=1 failed=0
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
