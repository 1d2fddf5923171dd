//! Listing data structures and the adapter that normalizes producer records.

pub mod listing;
pub mod normalize;
pub mod raw;

pub use listing::*;
pub use normalize::*;
pub use raw::*;
