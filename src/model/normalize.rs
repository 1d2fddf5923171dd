//! Boundary adapter from [`RawListing`] to the canonical [`Listing`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::listing::{BookInfo, Listing, ListingId, Seller, SellerProfile};
use super::raw::RawListing;
use crate::config;

/// Values substituted for fields a producer left out.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeDefaults {
    pub title: String,
    pub condition: String,
    pub kind: String,
    pub seller_name: String,
    pub seller_rating: f64,
}

impl Default for NormalizeDefaults {
    fn default() -> Self {
        Self {
            title: config::DEFAULT_TITLE.to_string(),
            condition: config::DEFAULT_CONDITION.to_string(),
            kind: config::DEFAULT_KIND.to_string(),
            seller_name: config::DEFAULT_SELLER_NAME.to_string(),
            seller_rating: config::DEFAULT_SELLER_RATING,
        }
    }
}

/// Converts raw records into listings, generating ids for records that carry none.
pub struct ListingNormalizer {
    defaults: NormalizeDefaults,
    next_id_fn: Box<dyn Fn() -> ListingId + Send + Sync>,
}

impl ListingNormalizer {
    pub fn new(
        defaults: NormalizeDefaults,
        next_id_fn: impl Fn() -> ListingId + Send + Sync + 'static,
    ) -> Self {
        Self {
            defaults,
            next_id_fn: Box::new(next_id_fn),
        }
    }

    /// Normalizer with a counter-based id generator (`listing_1`, `listing_2`, ...).
    pub fn with_defaults(defaults: NormalizeDefaults) -> Self {
        let counter = Arc::new(AtomicU64::new(1));
        Self::new(defaults, move || {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            ListingId::from(format!("{}{}", config::GENERATED_ID_PREFIX, id))
        })
    }

    pub fn defaults(&self) -> &NormalizeDefaults {
        &self.defaults
    }

    pub fn normalize(&self, raw: RawListing) -> Listing {
        let id = match raw.id {
            Some(id) if !id.as_str().is_empty() => id,
            _ => (self.next_id_fn)(),
        };

        let title = raw
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.defaults.title.clone());

        let price = match raw.price {
            Some(p) if p.is_finite() && p > 0.0 => p,
            _ => 0.0,
        };

        let seller = match raw.seller {
            Some(Seller::Profile(mut profile)) => {
                if profile.course.is_none() {
                    profile.course = raw.course.clone();
                }
                Seller::Profile(profile)
            }
            Some(Seller::Name(name)) => Seller::Profile(SellerProfile {
                name,
                rating: Some(raw.rating.unwrap_or(self.defaults.seller_rating)),
                course: raw.course.clone(),
            }),
            None => Seller::Profile(SellerProfile {
                name: self.defaults.seller_name.clone(),
                rating: Some(raw.rating.unwrap_or(self.defaults.seller_rating)),
                course: raw.course.clone(),
            }),
        };

        let book = raw.book.unwrap_or_else(|| BookInfo {
            title: Some(title.clone()),
            author: raw.author.clone(),
            cover: raw.image.clone(),
        });

        let photos = match (raw.photos, raw.image) {
            (Some(photos), _) => photos,
            (None, Some(image)) => vec![image],
            (None, None) => Vec::new(),
        };

        let listing = Listing {
            id,
            title,
            description: raw.description,
            price,
            condition: raw
                .condition
                .unwrap_or_else(|| self.defaults.condition.clone()),
            kind: raw.kind.unwrap_or_else(|| self.defaults.kind.clone()),
            author: raw.author,
            course: raw.course,
            book: Some(book),
            seller: Some(seller),
            photos,
            location: raw.location,
            created_at: raw.created_at,
        };
        debug!(id = %listing.id, title = %listing.title, "Normalized listing");
        listing
    }
}

impl Default for ListingNormalizer {
    fn default() -> Self {
        Self::with_defaults(NormalizeDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawListing {
        RawListing::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let normalizer = ListingNormalizer::default();
        let listing = normalizer.normalize(raw(json!({})));

        assert_eq!(listing.id.as_str(), "listing_1");
        assert_eq!(listing.title, config::DEFAULT_TITLE);
        assert_eq!(listing.price, 0.0);
        assert_eq!(listing.condition, config::DEFAULT_CONDITION);
        assert_eq!(listing.kind, config::DEFAULT_KIND);
        assert_eq!(
            listing.seller.as_ref().map(Seller::name),
            Some(config::DEFAULT_SELLER_NAME)
        );
        assert!(listing.photos.is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let normalizer = ListingNormalizer::default();
        let a = normalizer.normalize(RawListing::default());
        let b = normalizer.normalize(RawListing::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_negative_and_nan_prices_clamp_to_zero() {
        let normalizer = ListingNormalizer::default();
        let negative = normalizer.normalize(RawListing {
            price: Some(-3.0),
            ..RawListing::default()
        });
        let nan = normalizer.normalize(RawListing {
            price: Some(f64::NAN),
            ..RawListing::default()
        });
        assert_eq!(negative.price, 0.0);
        assert_eq!(nan.price, 0.0);
    }

    #[test]
    fn test_seller_name_becomes_profile_with_course() {
        let normalizer = ListingNormalizer::default();
        let listing = normalizer.normalize(raw(json!({
            "id": "9",
            "titulo": "Direito Civil",
            "autor": "Tartuce",
            "vendedor": "Carlos",
            "avaliacao": 4.2,
            "curso": "Direito",
            "imagem": "cover.jpg"
        })));

        assert_eq!(
            listing.seller,
            Some(Seller::Profile(SellerProfile {
                name: "Carlos".into(),
                rating: Some(4.2),
                course: Some("Direito".into()),
            }))
        );
        assert_eq!(listing.author(), Some("Tartuce"));
        assert_eq!(listing.course(), Some("Direito"));
        assert_eq!(listing.photos, vec!["cover.jpg".to_string()]);
        assert_eq!(
            listing.book.and_then(|b| b.cover),
            Some("cover.jpg".to_string())
        );
    }

    #[test]
    fn test_nested_shapes_are_kept() {
        let normalizer = ListingNormalizer::default();
        let listing = normalizer.normalize(raw(json!({
            "id": 2,
            "title": "Física",
            "livro": { "autor": "Halliday" },
            "vendedor": { "nome": "João", "avaliacao": 4.5, "curso": "Física" }
        })));

        assert_eq!(listing.author, None);
        assert_eq!(listing.author(), Some("Halliday"));
        assert_eq!(listing.course(), Some("Física"));
    }
}
