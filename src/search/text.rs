//! Case and diacritic folding for substring matching.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercases `text` and strips combining marks, so `Cálculo` folds to `calculo`.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A folded search term, ready to be tested against many fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Needle(String);

impl Needle {
    /// Returns `None` for terms that fold to nothing but whitespace: they filter nothing.
    pub fn new(term: &str) -> Option<Self> {
        let folded = fold(term);
        if folded.trim().is_empty() {
            None
        } else {
            Some(Self(folded))
        }
    }

    /// Absent fields never match.
    pub fn found_in(&self, haystack: Option<&str>) -> bool {
        haystack.is_some_and(|text| fold(text).contains(&self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
