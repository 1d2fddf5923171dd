//! Publish/subscribe channel for newly created listings.
//!
//! # Main Components
//!
//! - [`Broadcaster`] - Generic, payload-agnostic subscriber registry
//! - [`ListingBroadcaster`] - The marketplace channel, carrying raw JSON listing records
//! - [`global`] - Process-wide instance for call sites that cannot be handed a channel
//! - [`SubscriberError`] / [`PublishError`] - Error types
//!
//! Prefer passing a [`ListingBroadcaster`] handle explicitly (see
//! [`Marketplace`](crate::lifecycle::Marketplace)); [`global`] exists for code that is
//! not wired through the assembly.
//!
//! # Testing
//!
//! See [`mock`] for a recording subscriber with expectations.

pub mod core;
pub mod error;
pub mod mock;

use std::sync::OnceLock;

pub use self::core::*;
pub use self::error::*;

/// The marketplace channel. Payloads are producer records, passed through verbatim.
pub type ListingBroadcaster = Broadcaster<serde_json::Value>;

static GLOBAL: OnceLock<ListingBroadcaster> = OnceLock::new();

/// Returns the process-wide listing broadcaster, creating it on first use.
///
/// Every call returns the same instance.
pub fn global() -> &'static ListingBroadcaster {
    GLOBAL.get_or_init(ListingBroadcaster::default)
}
