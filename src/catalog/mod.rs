//! The catalog view: the authoritative in-memory listing collection.
//!
//! A [`Catalog`] is populated once from a [`ListingSource`] and then kept current by
//! listings arriving through a [`ListingBroadcaster`]. Each arriving record is normalized
//! and prepended, so the newest listing comes first. Reads go through the
//! [`SearchEngine`] and [`CatalogFilters`].

pub mod error;
pub mod fixtures;
pub mod source;

pub use error::*;
pub use source::*;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tracing::{error, info, warn};

use crate::broadcast::{ListingBroadcaster, SubscriberError, SubscriptionId};
use crate::model::{Listing, ListingId, ListingNormalizer, RawListing};
use crate::search::{available_courses, CatalogFilters, SearchEngine};

/// Shared handle to a listing collection. Clones see the same listings.
#[derive(Clone)]
pub struct Catalog {
    listings: Arc<Mutex<Vec<Listing>>>,
    normalizer: Arc<ListingNormalizer>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(ListingNormalizer::default())
    }
}

impl Catalog {
    pub fn new(normalizer: ListingNormalizer) -> Self {
        Self {
            listings: Arc::new(Mutex::new(Vec::new())),
            normalizer: Arc::new(normalizer),
        }
    }

    fn guard(&self) -> MutexGuard<'_, Vec<Listing>> {
        self.listings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the whole collection. For duplicate ids the first listing wins.
    pub fn replace(&self, listings: Vec<Listing>) -> usize {
        let mut unique: Vec<Listing> = Vec::with_capacity(listings.len());
        for listing in listings {
            if unique.iter().any(|l| l.id == listing.id) {
                warn!(id = %listing.id, "Dropping duplicate listing");
                continue;
            }
            unique.push(listing);
        }

        let count = unique.len();
        *self.guard() = unique;
        info!(count, "Catalog replaced");
        count
    }

    /// Fetches every record from `source` and replaces the collection with them.
    ///
    /// Records that are not JSON objects are skipped. On a source failure the current
    /// collection is left untouched.
    pub async fn refresh(&self, source: &dyn ListingSource) -> Result<usize, CatalogError> {
        let records = source.fetch().await.map_err(|e| {
            error!(error = %e, "Failed to load listings");
            CatalogError::Source(e)
        })?;

        let total = records.len();
        let listings: Vec<Listing> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match RawListing::from_value(record) {
                Ok(raw) => Some(self.normalizer.normalize(raw)),
                Err(e) => {
                    warn!(index, error = %e, "Skipping undecodable record");
                    None
                }
            })
            .collect();

        let count = self.replace(listings);
        info!(fetched = total, loaded = count, "Catalog refreshed");
        Ok(count)
    }

    /// Normalizes `raw` and puts it at the front, replacing any listing with the same id.
    pub fn merge_published(&self, raw: RawListing) -> Listing {
        let listing = self.normalizer.normalize(raw);
        let mut listings = self.guard();
        let before = listings.len();
        listings.retain(|l| l.id != listing.id);
        if listings.len() != before {
            info!(id = %listing.id, "Replacing listing with newer version");
        }
        listings.insert(0, listing.clone());
        info!(id = %listing.id, size = listings.len(), "Listing added");
        listing
    }

    /// Decodes a published JSON record and merges it.
    pub fn merge_value(&self, value: &Value) -> Result<Listing, SubscriberError> {
        let raw = RawListing::from_value(value.clone())?;
        Ok(self.merge_published(raw))
    }

    /// Subscribes this catalog to `broadcaster`.
    pub fn attach(&self, broadcaster: &ListingBroadcaster) -> SubscriptionId {
        let catalog = self.clone();
        broadcaster.subscribe(move |value: &Value| catalog.merge_value(value).map(|_| ()))
    }

    pub fn detach(&self, broadcaster: &ListingBroadcaster, subscription: SubscriptionId) -> bool {
        broadcaster.unsubscribe(subscription)
    }

    pub fn snapshot(&self) -> Vec<Listing> {
        self.guard().clone()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    pub fn find(&self, id: &ListingId) -> Option<Listing> {
        self.guard().iter().find(|l| &l.id == id).cloned()
    }

    /// Listings matching the engine's current query, in catalog order.
    pub fn search(&self, engine: &SearchEngine) -> Vec<Listing> {
        let listings = self.guard();
        engine.filter(&listings).into_iter().cloned().collect()
    }

    /// Free-text search narrowed by attribute filters.
    pub fn browse(&self, engine: &SearchEngine, filters: &CatalogFilters) -> Vec<Listing> {
        let listings = self.guard();
        filters
            .apply(engine.filter(&listings))
            .into_iter()
            .cloned()
            .collect()
    }

    /// Distinct courses across the collection, in first-seen order.
    pub fn courses(&self) -> Vec<String> {
        available_courses(self.guard().iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::Broadcaster;
    use crate::model::{Seller, SellerProfile};
    use crate::search::SearchKind;
    use serde_json::json;

    struct FailingSource;

    #[async_trait::async_trait]
    impl ListingSource for FailingSource {
        async fn fetch(&self) -> Result<Vec<Value>, SourceError> {
            Err(SourceError::Unavailable("connection refused".into()))
        }
    }

    fn ids(listings: &[Listing]) -> Vec<String> {
        listings.iter().map(|l| l.id.to_string()).collect()
    }

    #[test]
    fn test_replace_keeps_first_duplicate() {
        let catalog = Catalog::default();
        let count = catalog.replace(vec![
            Listing::new(1, "first"),
            Listing::new(2, "other"),
            Listing::new(1, "second"),
        ]);
        assert_eq!(count, 2);
        assert_eq!(
            catalog.find(&ListingId::from(1)).map(|l| l.title),
            Some("first".to_string())
        );
    }

    #[test]
    fn test_merge_prepends_and_dedups() {
        let catalog = Catalog::default();
        catalog.replace(vec![Listing::new(1, "a"), Listing::new(2, "b")]);

        catalog.merge_published(RawListing {
            id: Some(ListingId::from(3)),
            title: Some("c".into()),
            ..RawListing::default()
        });
        assert_eq!(ids(&catalog.snapshot()), vec!["3", "1", "2"]);

        catalog.merge_published(RawListing {
            id: Some(ListingId::from(2)),
            title: Some("b2".into()),
            ..RawListing::default()
        });
        assert_eq!(ids(&catalog.snapshot()), vec!["2", "3", "1"]);
        assert_eq!(catalog.snapshot()[0].title, "b2");
    }

    #[test]
    fn test_attached_catalog_receives_broadcasts() {
        let broadcaster = Broadcaster::default();
        let catalog = Catalog::default();
        let subscription = catalog.attach(&broadcaster);

        broadcaster
            .publish(&json!({ "id": 3, "titulo": "Nova Química" }))
            .unwrap();
        assert_eq!(catalog.len(), 1);

        assert!(catalog.detach(&broadcaster, subscription));
        broadcaster.publish(&json!({ "id": 4 })).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_undecodable_broadcast_is_a_subscriber_error() {
        let broadcaster = Broadcaster::default();
        let catalog = Catalog::default();
        catalog.attach(&broadcaster);

        let report = broadcaster.publish(&json!("not a record")).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            SubscriberError::Decode(_)
        ));
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_skips_bad_records() {
        let catalog = Catalog::default();
        let source = StaticSource::new(vec![
            json!({ "id": 1, "titulo": "Cálculo", "curso": "Engenharia Civil" }),
            json!(42),
            json!({ "id": 2, "titulo": "Física" }),
        ]);

        let count = catalog.refresh(&source).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(ids(&catalog.snapshot()), vec!["1", "2"]);
    }

    fn loosely_typed_records() -> Vec<Value> {
        vec![
            json!({ "id": 5, "titulo": "Cálculo", "avaliacao": "4.8" }),
            json!({ "id": 6, "tipo": "venda", "listingType": "venda" }),
            json!({ "id": 7, "fotos": "a.jpg" }),
            json!({ "id": 8, "vendedor": { "avaliacao": 4.0 } }),
        ]
    }

    #[test]
    fn test_malformed_fields_do_not_drop_published_listings() {
        let broadcaster = Broadcaster::default();
        let catalog = Catalog::default();
        catalog.attach(&broadcaster);

        for record in loosely_typed_records() {
            let report = broadcaster.publish(&record).unwrap();
            assert!(report.is_clean(), "record: {record}");
            assert_eq!(report.delivered, 1);
        }

        assert_eq!(ids(&catalog.snapshot()), vec!["8", "7", "6", "5"]);
        let rated = catalog.find(&ListingId::from(5)).unwrap();
        assert_eq!(rated.title, "Cálculo");
        assert_eq!(
            rated.seller,
            Some(Seller::Profile(SellerProfile {
                name: crate::config::DEFAULT_SELLER_NAME.into(),
                rating: Some(4.8),
                course: None,
            }))
        );
        assert_eq!(catalog.find(&ListingId::from(6)).unwrap().kind, "venda");
        assert_eq!(catalog.find(&ListingId::from(7)).unwrap().photos, vec!["a.jpg"]);
        assert_eq!(
            catalog
                .find(&ListingId::from(8))
                .unwrap()
                .seller
                .as_ref()
                .map(Seller::name),
            Some(crate::config::DEFAULT_SELLER_NAME)
        );
    }

    #[tokio::test]
    async fn test_refresh_keeps_records_with_malformed_fields() {
        let catalog = Catalog::default();
        let source = StaticSource::new(loosely_typed_records());

        let count = catalog.refresh(&source).await.unwrap();
        assert_eq!(count, 4);
        assert_eq!(ids(&catalog.snapshot()), vec!["5", "6", "7", "8"]);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_collection() {
        let catalog = Catalog::default();
        catalog.replace(fixtures::demo_listings());

        let result = catalog.refresh(&FailingSource).await;
        assert!(matches!(
            result,
            Err(CatalogError::Source(SourceError::Unavailable(_)))
        ));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_browse_combines_search_and_filters() {
        let catalog = Catalog::default();
        catalog.replace(fixtures::demo_listings());

        let mut engine = SearchEngine::with_strategy(SearchKind::All);
        engine.set_query("livro");
        assert_eq!(catalog.search(&engine).len(), 3);

        let filters = CatalogFilters {
            kind: Some("donation".into()),
            ..CatalogFilters::default()
        };
        assert_eq!(ids(&catalog.browse(&engine, &filters)), vec!["3"]);
    }

    #[test]
    fn test_courses() {
        let catalog = Catalog::default();
        catalog.replace(fixtures::demo_listings());
        assert_eq!(
            catalog.courses(),
            vec!["Engenharia Civil", "Física", "Química"]
        );
    }
}
