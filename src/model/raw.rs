//! Loosely-shaped listing records as producers and the back-end send them.
//!
//! Every field is optional and several fields accept alternate names (`tipo` or
//! `listingType` for the kind, `fotos` for photos, and so on). Decoding never fails on a
//! field: a value of the wrong shape is read as absent, and when a record carries more than
//! one name for the same field the first name listed below that decodes wins. Only a record
//! that is not a JSON object is rejected.
//!
//! Nothing here is validated; [`ListingNormalizer`](super::ListingNormalizer) turns a
//! `RawListing` into a [`Listing`](super::Listing).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::listing::{BookInfo, ListingId, Seller, SellerProfile};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ListingId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<Seller>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<BookInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl RawListing {
    /// Decodes a JSON record. Unknown fields are ignored; malformed fields become `None`.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    fn from_fields(fields: Fields<'_>) -> Self {
        Self {
            id: fields.get(&["id"]),
            title: fields.get(&["title", "titulo"]),
            description: fields.get(&["description", "descricao"]),
            price: fields.find(&["price", "preco"], lenient_number),
            condition: fields.get(&["condition", "condicao"]),
            kind: fields.get(&["kind", "tipo", "listingType"]),
            author: fields.get(&["author", "autor"]),
            course: fields.get(&["course", "curso"]),
            seller: fields.find(&["seller", "vendedor"], loose_seller),
            rating: fields.find(&["rating", "avaliacao"], lenient_number),
            book: fields.find(&["book", "livro"], loose_book),
            photos: fields.find(&["photos", "fotos"], loose_photos),
            image: fields.get(&["image", "imagem"]),
            location: fields.get(&["location", "localizacao"]),
            created_at: fields.get(&["created_at", "createdAt"]),
        }
    }
}

impl<'de> Deserialize<'de> for RawListing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_fields(Fields(&map)))
    }
}

/// Alias-aware, mismatch-tolerant view over a JSON object.
#[derive(Clone, Copy)]
struct Fields<'a>(&'a Map<String, Value>);

impl Fields<'_> {
    /// First of `names` whose value `decode` accepts; `null` counts as absent.
    fn find<T>(&self, names: &[&str], decode: impl Fn(&Value) -> Option<T>) -> Option<T> {
        names
            .iter()
            .filter_map(|name| self.0.get(*name))
            .filter(|value| !value.is_null())
            .find_map(decode)
    }

    fn get<T: DeserializeOwned>(&self, names: &[&str]) -> Option<T> {
        self.find(names, |value| T::deserialize(value).ok())
    }
}

/// Accepts `12.5`, `"12.5"` or `"12,5"`; anything unparsable becomes `None`.
fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    }
}

/// A bare name, or a profile that at least carries a name.
fn loose_seller(value: &Value) -> Option<Seller> {
    match value {
        Value::String(name) => Some(Seller::Name(name.clone())),
        Value::Object(map) => {
            let fields = Fields(map);
            Some(Seller::Profile(SellerProfile {
                name: fields.get(&["name", "nome"])?,
                rating: fields.find(&["rating", "avaliacao"], lenient_number),
                course: fields.get(&["course", "curso"]),
            }))
        }
        _ => None,
    }
}

fn loose_book(value: &Value) -> Option<BookInfo> {
    let fields = Fields(value.as_object()?);
    Some(BookInfo {
        title: fields.get(&["title", "titulo"]),
        author: fields.get(&["author", "autor"]),
        cover: fields.get(&["cover", "capa"]),
    })
}

/// A list of URLs, skipping non-text entries; a single URL counts as a one-photo list.
fn loose_photos(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        Value::String(url) => Some(vec![url.clone()]),
        _ => None,
    }
}
