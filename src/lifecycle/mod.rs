//! # Assembly & Lifecycle
//!
//! This module wires the catalog core together and owns its lifetime.
//!
//! The [`Marketplace`] creates one [`ListingBroadcaster`](crate::broadcast::ListingBroadcaster)
//! and hands it to both sides: the [`ListingPublisher`](crate::publisher::ListingPublisher)
//! used by the listing-creation flow, and the [`Catalog`](crate::catalog::Catalog) that
//! displays listings. Passing the handle explicitly keeps the channel's lifetime tied to the
//! assembly instead of a global.
//!
//! ```rust,ignore
//! let market = Marketplace::new(MarketplaceConfig::from_env());
//! market.load_or_fallback(&source, fixtures::demo_listings()).await;
//!
//! let mut engine = market.search_engine();
//! engine.set_query("calc");
//! let hits = market.catalog.search(&engine);
//!
//! market.shutdown();
//! ```
//!
//! [`setup_tracing`] initializes structured logging for binaries; see [`tracing`](self::tracing).

pub mod marketplace;
pub mod tracing;

pub use marketplace::*;
pub use self::tracing::*;
