//! Attribute filters applied next to the free-text search.

use serde::{Deserialize, Serialize};

use crate::model::Listing;

/// Exact-match and price-range criteria. Unset criteria accept every listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilters {
    pub course: Option<String>,
    pub condition: Option<String>,
    pub kind: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl CatalogFilters {
    pub fn is_empty(&self) -> bool {
        self.course.is_none()
            && self.condition.is_none()
            && self.kind.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(course) = non_blank(&self.course) {
            if listing.course() != Some(course) {
                return false;
            }
        }
        if let Some(condition) = non_blank(&self.condition) {
            if listing.condition != condition {
                return false;
            }
        }
        if let Some(kind) = non_blank(&self.kind) {
            if listing.kind != kind {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if listing.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if listing.price > max {
                return false;
            }
        }
        true
    }

    /// Stable filter: matching listings keep their relative order.
    pub fn apply<'a, I>(&self, listings: I) -> Vec<&'a Listing>
    where
        I: IntoIterator<Item = &'a Listing>,
    {
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }
}

// Filter menus send "" for "any".
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Distinct courses in first-seen order, for building a course menu.
pub fn available_courses<'a, I>(listings: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let mut courses: Vec<String> = Vec::new();
    for course in listings.into_iter().filter_map(Listing::course) {
        if !courses.iter().any(|c| c == course) {
            courses.push(course.to_string());
        }
    }
    courses
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Listing> {
        vec![
            Listing::new(1, "Cálculo")
                .with_course("Engenharia Civil")
                .with_condition("used")
                .with_kind("sale")
                .with_price(45.5),
            Listing::new(2, "Física")
                .with_course("Física")
                .with_condition("new")
                .with_kind("trade")
                .with_price(68.9),
            Listing::new(3, "Química")
                .with_course("Engenharia Civil")
                .with_condition("new")
                .with_kind("donation"),
        ]
    }

    fn ids(listings: &[&Listing]) -> Vec<String> {
        listings.iter().map(|l| l.id.to_string()).collect()
    }

    #[test]
    fn test_empty_filters_pass_everything() {
        let listings = sample();
        let filters = CatalogFilters::default();
        assert!(filters.is_empty());
        assert_eq!(ids(&filters.apply(&listings)), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_blank_strings_mean_any() {
        let listings = sample();
        let filters = CatalogFilters {
            course: Some(String::new()),
            ..CatalogFilters::default()
        };
        assert_eq!(filters.apply(&listings).len(), 3);
    }

    #[test]
    fn test_criteria_combine() {
        let listings = sample();
        let filters = CatalogFilters {
            course: Some("Engenharia Civil".into()),
            condition: Some("new".into()),
            ..CatalogFilters::default()
        };
        assert_eq!(ids(&filters.apply(&listings)), vec!["3"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let listings = sample();
        let filters = CatalogFilters {
            min_price: Some(45.5),
            max_price: Some(60.0),
            ..CatalogFilters::default()
        };
        assert_eq!(ids(&filters.apply(&listings)), vec!["1"]);

        let free = CatalogFilters {
            max_price: Some(0.0),
            ..CatalogFilters::default()
        };
        assert_eq!(ids(&free.apply(&listings)), vec!["3"]);
    }

    #[test]
    fn test_available_courses_are_distinct_in_order() {
        let listings = sample();
        assert_eq!(
            available_courses(&listings),
            vec!["Engenharia Civil".to_string(), "Física".to_string()]
        );
    }
}
