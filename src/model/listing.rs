/// Represents a textbook offered on the marketplace.
///
/// # Catalog
/// A `Listing` is the canonical shape held by a [`Catalog`](crate::catalog::Catalog) and
/// read by the [`SearchEngine`](crate::search::SearchEngine). Records arriving from
/// producers or the back-end are converted into this shape by
/// [`ListingNormalizer`](crate::model::ListingNormalizer) before they are merged.
///
/// Author and course can live at the top level or nested (under `book` and `seller`);
/// use [`Listing::author`] and [`Listing::course`] instead of reading fields directly.
use serde::{Deserialize, Deserializer, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Listings.
///
/// Producers send either numbers or strings; both are stored as text so that `1` and `"1"`
/// name the same listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ListingId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ListingId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ListingId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ListingId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Unsigned(u64),
            Signed(i64),
            Float(f64),
            Text(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Unsigned(n) => Self(n.to_string()),
            Repr::Signed(n) => Self(n.to_string()),
            Repr::Float(n) => Self(n.to_string()),
            Repr::Text(s) => Self(s),
        })
    }
}

/// Who is offering the book: either a bare display name or a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seller {
    Name(String),
    Profile(SellerProfile),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerProfile {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(default, alias = "avaliacao")]
    pub rating: Option<f64>,
    #[serde(default, alias = "curso")]
    pub course: Option<String>,
}

impl Seller {
    pub fn name(&self) -> &str {
        match self {
            Seller::Name(name) => name,
            Seller::Profile(profile) => &profile.name,
        }
    }

    /// Only profiles carry a course.
    pub fn course(&self) -> Option<&str> {
        match self {
            Seller::Name(_) => None,
            Seller::Profile(profile) => profile.course.as_deref(),
        }
    }
}

/// Bibliographic details nested under a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookInfo {
    #[serde(default, alias = "titulo")]
    pub title: Option<String>,
    #[serde(default, alias = "autor")]
    pub author: Option<String>,
    #[serde(default, alias = "capa")]
    pub cover: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub book: Option<BookInfo>,
    #[serde(default)]
    pub seller: Option<Seller>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Listing {
    /// Creates a bare Listing; the remaining fields start empty.
    ///
    /// # Arguments
    /// * `id` - Identifier, unique within a catalog
    /// * `title` - Display title
    pub fn new(id: impl Into<ListingId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            price: 0.0,
            condition: String::new(),
            kind: String::new(),
            author: None,
            course: None,
            book: None,
            seller: None,
            photos: Vec::new(),
            location: None,
            created_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.course = Some(course.into());
        self
    }

    pub fn with_book(mut self, book: BookInfo) -> Self {
        self.book = Some(book);
        self
    }

    pub fn with_seller(mut self, seller: Seller) -> Self {
        self.seller = Some(seller);
        self
    }

    pub fn with_photos(mut self, photos: Vec<String>) -> Self {
        self.photos = photos;
        self
    }

    /// Top-level author, falling back to the nested book author.
    pub fn author(&self) -> Option<&str> {
        self.author
            .as_deref()
            .or_else(|| self.book.as_ref().and_then(|book| book.author.as_deref()))
    }

    /// Top-level course, falling back to the seller's course.
    pub fn course(&self) -> Option<&str> {
        self.course
            .as_deref()
            .or_else(|| self.seller.as_ref().and_then(Seller::course))
    }

    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }
}
