//! Configuration constants and runtime settings for the marketplace core.
//!
//! Defaults used when normalizing incomplete listing records live here as constants;
//! [`MarketplaceConfig`] collects the settings a deployment may override through the
//! environment.

use tracing::warn;

use crate::broadcast::FaultPolicy;
use crate::model::NormalizeDefaults;
use crate::search::SearchKind;

/// Title given to listings published without one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Condition tag assumed when a producer omits it.
pub const DEFAULT_CONDITION: &str = "new";

/// Listing kind assumed when a producer omits it.
pub const DEFAULT_KIND: &str = "sale";

/// Display name for listings without a seller.
pub const DEFAULT_SELLER_NAME: &str = "New seller";

/// Rating given to sellers that have none yet.
pub const DEFAULT_SELLER_RATING: f64 = 5.0;

/// Prefix of ids generated for records that arrive without one.
pub const GENERATED_ID_PREFIX: &str = "listing_";

/// Environment variable selecting the broadcaster [`FaultPolicy`] (`isolate` or `abort`).
pub const FAULT_POLICY_ENV: &str = "MARKETPLACE_FAULT_POLICY";

/// Environment variable selecting the initial [`SearchKind`] (`title`, `author`, `course`, `all`).
pub const SEARCH_KIND_ENV: &str = "MARKETPLACE_SEARCH_KIND";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketplaceConfig {
    pub fault_policy: FaultPolicy,
    pub default_search: SearchKind,
    pub defaults: NormalizeDefaults,
}

impl MarketplaceConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`; unset keys keep their defaults and unparsable
    /// values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(FAULT_POLICY_ENV) {
            match value.parse() {
                Ok(policy) => config.fault_policy = policy,
                Err(e) => warn!(key = FAULT_POLICY_ENV, error = %e, "Ignoring invalid setting"),
            }
        }

        if let Some(value) = lookup(SEARCH_KIND_ENV) {
            config.default_search = SearchKind::from_tag(&value).unwrap_or_else(|| {
                warn!(key = SEARCH_KIND_ENV, %value, "Unknown search kind, using all");
                SearchKind::All
            });
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = MarketplaceConfig::from_lookup(|_| None);
        assert_eq!(config, MarketplaceConfig::default());
        assert_eq!(config.fault_policy, FaultPolicy::Isolate);
        assert_eq!(config.default_search, SearchKind::All);
        assert_eq!(config.defaults.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = MarketplaceConfig::from_lookup(lookup_from(&[
            (FAULT_POLICY_ENV, "abort"),
            (SEARCH_KIND_ENV, "course"),
        ]));
        assert_eq!(config.fault_policy, FaultPolicy::Abort);
        assert_eq!(config.default_search, SearchKind::Course);
    }

    #[test]
    fn test_search_kind_tags_are_case_insensitive() {
        let config = MarketplaceConfig::from_lookup(lookup_from(&[(SEARCH_KIND_ENV, "Autor")]));
        assert_eq!(config.default_search, SearchKind::Author);

        let config = MarketplaceConfig::from_lookup(lookup_from(&[(SEARCH_KIND_ENV, "ALL")]));
        assert_eq!(config.default_search, SearchKind::All);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = MarketplaceConfig::from_lookup(lookup_from(&[
            (FAULT_POLICY_ENV, "sometimes"),
            (SEARCH_KIND_ENV, "isbn"),
        ]));
        assert_eq!(config.fault_policy, FaultPolicy::Isolate);
        assert_eq!(config.default_search, SearchKind::All);
    }
}
