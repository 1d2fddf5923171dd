use tracing::debug;

use serde::{Deserialize, Serialize};

use super::strategy::SearchKind;
use super::text::Needle;
use crate::model::Listing;

/// The term and strategy a view is currently searching with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub term: String,
    pub kind: SearchKind,
}

/// Strategy-selectable filter over a listing collection.
///
/// The engine only holds query state; [`SearchEngine::filter`] is a pure function of that
/// state and its input, so calling it twice on the same slice yields the same listings in
/// the same order.
///
/// # Example
///
/// ```
/// use textbook_exchange::model::Listing;
/// use textbook_exchange::search::{SearchEngine, SearchKind};
///
/// let listings = vec![
///     Listing::new(1, "Cálculo Vol. 1").with_author("James Stewart"),
///     Listing::new(2, "Física").with_author("Halliday"),
/// ];
///
/// let mut engine = SearchEngine::new();
/// engine.set_strategy(SearchKind::Title);
/// engine.set_query("calc");
///
/// let hits = engine.filter(&listings);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id.as_str(), "1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    query: SearchQuery,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(kind: SearchKind) -> Self {
        Self {
            query: SearchQuery {
                term: String::new(),
                kind,
            },
        }
    }

    /// Switches the field-matching strategy for subsequent filters.
    pub fn set_strategy(&mut self, kind: SearchKind) {
        debug!(from = %self.query.kind, to = %kind, "Search strategy changed");
        self.query.kind = kind;
    }

    /// Like [`set_strategy`](Self::set_strategy) but from a tag; unknown tags mean `all`.
    pub fn set_strategy_tag(&mut self, tag: &str) {
        self.set_strategy(SearchKind::parse(tag));
    }

    pub fn set_query(&mut self, term: impl Into<String>) {
        self.query.term = term.into();
        debug!(term = %self.query.term, kind = %self.query.kind, "Search query changed");
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn strategy(&self) -> SearchKind {
        self.query.kind
    }

    /// `false` when the term is blank and `filter` passes everything through.
    pub fn is_active(&self) -> bool {
        Needle::new(&self.query.term).is_some()
    }

    /// Returns the listings matching the current query, in their original order.
    pub fn filter<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        let Some(needle) = Needle::new(&self.query.term) else {
            return listings.iter().collect();
        };

        let kind = self.query.kind;
        let matches: Vec<&Listing> = listings
            .iter()
            .filter(|listing| kind.matches(listing, &needle))
            .collect();
        debug!(
            term = %self.query.term,
            %kind,
            total = listings.len(),
            matched = matches.len(),
            "Filtered listings"
        );
        matches
    }
}
