//! Field-selection strategies for catalog search.
//!
//! Each [`SearchKind`] decides which listing fields a term is tested against. The matching
//! algorithm is the same for every kind (folded substring containment, see
//! [`Needle`](super::text::Needle)); only the fields change.

use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::text::Needle;
use crate::model::Listing;

/// Which fields a search term is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// Listing title only.
    Title,
    /// Top-level author, else the nested book author.
    Author,
    /// Top-level course, else the seller's course.
    Course,
    /// Any of title, author, course or description.
    #[default]
    All,
}

impl SearchKind {
    pub const ALL_KINDS: [SearchKind; 4] = [
        SearchKind::Title,
        SearchKind::Author,
        SearchKind::Course,
        SearchKind::All,
    ];

    /// Maps a tag to a kind. Unknown tags fall back to [`SearchKind::All`].
    ///
    /// Accepts the English tags and the `titulo` / `autor` / `curso` / `tudo` tags sent by
    /// older front-ends.
    pub fn parse(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_default()
    }

    /// Like [`SearchKind::parse`], but `None` for tags it does not know.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "title" | "titulo" => Some(SearchKind::Title),
            "author" | "autor" => Some(SearchKind::Author),
            "course" | "curso" => Some(SearchKind::Course),
            "all" | "tudo" => Some(SearchKind::All),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Title => "title",
            SearchKind::Author => "author",
            SearchKind::Course => "course",
            SearchKind::All => "all",
        }
    }

    pub fn matches(self, listing: &Listing, needle: &Needle) -> bool {
        match self {
            SearchKind::Title => needle.found_in(Some(&listing.title)),
            SearchKind::Author => needle.found_in(listing.author()),
            SearchKind::Course => needle.found_in(listing.course()),
            SearchKind::All => {
                needle.found_in(Some(&listing.title))
                    || needle.found_in(listing.author())
                    || needle.found_in(listing.course())
                    || needle.found_in(listing.description.as_deref())
            }
        }
    }
}

impl FromStr for SearchKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BookInfo, Seller, SellerProfile};

    #[test]
    fn test_parse_tags() {
        assert_eq!(SearchKind::parse("title"), SearchKind::Title);
        assert_eq!(SearchKind::parse("Autor"), SearchKind::Author);
        assert_eq!(SearchKind::parse("curso"), SearchKind::Course);
        assert_eq!(SearchKind::parse("tudo"), SearchKind::All);
        assert_eq!(SearchKind::from_tag(" ALL "), Some(SearchKind::All));
        assert_eq!(SearchKind::from_tag("isbn"), None);
        assert_eq!(SearchKind::parse("isbn"), SearchKind::All);
        assert_eq!("".parse::<SearchKind>(), Ok(SearchKind::All));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in SearchKind::ALL_KINDS {
            assert_eq!(SearchKind::parse(&kind.to_string()), kind);
        }
    }

    #[test]
    fn test_each_kind_checks_its_own_field() {
        let listing = Listing::new(1, "Cálculo")
            .with_description("limites e derivadas")
            .with_book(BookInfo {
                author: Some("Stewart".into()),
                ..BookInfo::default()
            })
            .with_seller(Seller::Profile(SellerProfile {
                name: "Maria".into(),
                rating: None,
                course: Some("Engenharia Civil".into()),
            }));

        let stewart = Needle::new("stewart").unwrap();
        assert!(!SearchKind::Title.matches(&listing, &stewart));
        assert!(SearchKind::Author.matches(&listing, &stewart));
        assert!(SearchKind::All.matches(&listing, &stewart));

        let civil = Needle::new("CIVIL").unwrap();
        assert!(SearchKind::Course.matches(&listing, &civil));
        assert!(!SearchKind::Author.matches(&listing, &civil));

        let derivadas = Needle::new("derivadas").unwrap();
        assert!(SearchKind::All.matches(&listing, &derivadas));
        assert!(!SearchKind::Title.matches(&listing, &derivadas));
    }

    #[test]
    fn test_missing_fields_never_match() {
        let bare = Listing::new(1, "Física");
        let needle = Needle::new("halliday").unwrap();
        for kind in SearchKind::ALL_KINDS {
            assert!(!kind.matches(&bare, &needle), "{kind} matched a bare listing");
        }
    }
}
