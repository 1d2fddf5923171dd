use tracing::{debug, error, info};

use crate::broadcast::{ListingBroadcaster, SubscriptionId};
use crate::catalog::{Catalog, CatalogError, ListingSource};
use crate::config::MarketplaceConfig;
use crate::model::{Listing, ListingNormalizer};
use crate::publisher::ListingPublisher;
use crate::search::SearchEngine;

/// How the catalog was populated by [`Marketplace::load_or_fallback`].
#[derive(Debug)]
pub enum LoadOutcome {
    /// Loaded from the source.
    Fetched(usize),
    /// The source failed; the fallback listings were used instead.
    Fallback { count: usize, error: CatalogError },
}

/// The application assembly for the catalog core.
///
/// `Marketplace` is responsible for:
/// - **Wiring**: one broadcaster shared by the publisher (producer) and the catalog (consumer)
/// - **Lifecycle**: attaching the catalog on construction, detaching it on shutdown
/// - **Configuration**: fault policy, initial search strategy, normalization defaults
///
/// # Example
///
/// ```
/// use textbook_exchange::config::MarketplaceConfig;
/// use textbook_exchange::lifecycle::Marketplace;
/// use textbook_exchange::model::RawListing;
///
/// let market = Marketplace::new(MarketplaceConfig::default());
///
/// let record = RawListing { title: Some("Nova Química".into()), ..RawListing::default() };
/// market.publisher.publish(&record).unwrap();
///
/// assert_eq!(market.catalog.len(), 1);
/// market.shutdown();
/// ```
pub struct Marketplace {
    /// Channel carrying newly created listings
    pub broadcaster: ListingBroadcaster,

    /// The listing collection shown to the user
    pub catalog: Catalog,

    /// Entry point for the listing-creation flow
    pub publisher: ListingPublisher,

    config: MarketplaceConfig,
    subscription: SubscriptionId,
}

impl Marketplace {
    /// Builds a marketplace around a fresh broadcaster using the configured fault policy.
    pub fn new(config: MarketplaceConfig) -> Self {
        let broadcaster = ListingBroadcaster::new(config.fault_policy);
        Self::with_broadcaster(config, broadcaster)
    }

    /// Builds a marketplace around an existing channel, e.g. [`crate::broadcast::global`].
    pub fn with_broadcaster(config: MarketplaceConfig, broadcaster: ListingBroadcaster) -> Self {
        let catalog = Catalog::new(ListingNormalizer::with_defaults(config.defaults.clone()));
        let subscription = catalog.attach(&broadcaster);
        let publisher = ListingPublisher::new(broadcaster.clone());

        info!(
            %subscription,
            policy = ?broadcaster.policy(),
            search = %config.default_search,
            "Marketplace started"
        );

        Self {
            broadcaster,
            catalog,
            publisher,
            config,
            subscription,
        }
    }

    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }

    /// A search engine preset to the configured strategy.
    pub fn search_engine(&self) -> SearchEngine {
        SearchEngine::with_strategy(self.config.default_search)
    }

    /// Loads the catalog from `source`; if that fails, seeds it with `fallback`.
    pub async fn load_or_fallback(
        &self,
        source: &dyn ListingSource,
        fallback: Vec<Listing>,
    ) -> LoadOutcome {
        match self.catalog.refresh(source).await {
            Ok(count) => LoadOutcome::Fetched(count),
            Err(error) => {
                error!(error = %error, "Using fallback listings");
                let count = self.catalog.replace(fallback);
                LoadOutcome::Fallback { count, error }
            }
        }
    }

    /// Detaches the catalog from the channel.
    ///
    /// With a shared channel (such as the global one) other subscribers stay registered.
    /// Dropping a `Marketplace` detaches it too; `shutdown` adds the lifecycle logging.
    pub fn shutdown(self) {
        info!("Shutting down marketplace...");
        self.catalog.detach(&self.broadcaster, self.subscription);
        info!(remaining = self.broadcaster.len(), "Marketplace shutdown complete.");
    }
}

impl Drop for Marketplace {
    fn drop(&mut self) {
        if self.catalog.detach(&self.broadcaster, self.subscription) {
            debug!(subscription = %self.subscription, "Marketplace dropped, catalog detached");
        }
    }
}
