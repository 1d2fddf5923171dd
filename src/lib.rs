//! # Textbook Exchange
//!
//! > **The catalog core of a student-to-student textbook marketplace.**
//!
//! This crate holds the logic behind browsing listings: a strategy-selectable search over
//! the in-memory catalog, and a publish/subscribe channel that pushes newly created
//! listings into every view showing the catalog, without re-fetching it.
//!
//! ## 🏗️ Design
//!
//! ### Strategies as an enum
//! Searching "by title", "by author", "by course" or "everywhere" uses the same matching
//! algorithm (case- and accent-insensitive substring containment) over different fields.
//! [`SearchKind`](search::SearchKind) is a closed enum, and matching dispatches on it with a
//! `match`. Unknown strategy tags map to `All` instead of failing.
//!
//! ### Normalize at the boundary
//! Producers and the back-end send records with inconsistent field names (`tipo` vs
//! `listingType`, a seller as a name or as a profile). [`RawListing`](model::RawListing)
//! accepts all of them and [`ListingNormalizer`](model::ListingNormalizer) turns them into one
//! canonical [`Listing`](model::Listing), so search code never checks alternate fields.
//!
//! ### Explicit channel, optional global
//! The [`Broadcaster`](broadcast::Broadcaster) is a cloneable handle. The
//! [`Marketplace`](lifecycle::Marketplace) assembly creates one and passes it to both the
//! publisher and the catalog. [`broadcast::global`] is there for code outside the assembly.
//!
//! ### Subscriber faults
//! A failing subscriber does not stop the others by default
//! ([`FaultPolicy::Isolate`](broadcast::FaultPolicy::Isolate)); every failure is logged and
//! reported. [`FaultPolicy::Abort`](broadcast::FaultPolicy::Abort) restores stop-at-first-error
//! delivery.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - `Listing`, the raw record shape, and the normalizer.
//! - [`search`] - `SearchKind`, `SearchEngine`, `CatalogFilters`.
//! - [`broadcast`] - `Broadcaster`, fault policy, the global channel, a mock subscriber.
//! - [`catalog`] - The view-side collection, its data source, fallback fixtures.
//! - [`publisher`] - The producer-side entry point.
//! - [`lifecycle`] - `Marketplace` assembly and tracing setup.
//! - [`config`] - Defaults and environment overrides.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Search by course, stop publishing at the first failing subscriber
//! MARKETPLACE_SEARCH_KIND=course MARKETPLACE_FAULT_POLICY=abort cargo run
//! ```

pub mod broadcast;
pub mod catalog;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod publisher;
pub mod search;
