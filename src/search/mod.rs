//! Catalog search: field strategies, the query engine and attribute filters.
//!
//! # Main Components
//!
//! - [`SearchKind`] - Which fields a term is matched against (title, author, course, all)
//! - [`SearchEngine`] - Holds the current query and filters a listing slice
//! - [`CatalogFilters`] - Exact-match and price-range criteria
//!
//! Matching is substring containment after folding case and diacritics.

pub mod engine;
pub mod filters;
pub mod strategy;
pub mod text;

pub use engine::*;
pub use filters::*;
pub use strategy::*;
