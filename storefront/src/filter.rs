//! Product filtering by title query, rating, price and category.

use crate::types::{Product, RATING_MAX};
use serde::{Deserialize, Serialize};

/// Structured filter criteria; `None` leaves a dimension unconstrained
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilters {
    /// Minimum rating, inclusive
    pub min_rating: Option<f64>,
    /// Maximum price, inclusive
    pub max_price: Option<f64>,
    /// Category, matched case-insensitively
    pub category: Option<String>,
}

impl ProductFilters {
    /// Filters that match every product
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// True when no dimension is constrained
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.min_rating.is_none() && self.max_price.is_none() && self.category.is_none()
    }

    /// Rating, price and category checks (the title query is separate)
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.min_rating.is_none_or(|min| product.rating.rate >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
            && self
                .category
                .as_deref()
                .is_none_or(|category| product.category.to_lowercase() == category.to_lowercase())
    }
}

/// Case-insensitive substring match; an empty query matches everything
#[must_use]
pub fn title_matches(title: &str, query: &str) -> bool {
    title.to_lowercase().contains(&query.to_lowercase())
}

/// Products matching the title query and every active filter, in input order
#[must_use]
pub fn filter_products<'a>(
    products: &'a [Product],
    title_query: &str,
    filters: &ProductFilters,
) -> Vec<&'a Product> {
    let query = title_query.to_lowercase();
    products
        .iter()
        .filter(|product| product.title.to_lowercase().contains(&query) && filters.matches(product))
        .collect()
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Accept a minimum rating within `[0, 5]`
#[must_use]
pub fn parse_min_rating(text: &str) -> Option<f64> {
    parse_number(text).filter(|rating| (0.0..=f64::from(RATING_MAX)).contains(rating))
}

/// Accept a non-negative maximum price
#[must_use]
pub fn parse_max_price(text: &str) -> Option<f64> {
    parse_number(text).filter(|price| *price >= 0.0)
}

/// Filter form being edited
///
/// Invalid numeric input does not fail; it clears the field, leaving that
/// dimension unconstrained once applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterDraft {
    min_rating: Option<f64>,
    max_price: Option<f64>,
    category: String,
}

impl FilterDraft {
    /// An empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A form prefilled from applied filters
    #[must_use]
    pub fn from_filters(filters: &ProductFilters) -> Self {
        Self {
            min_rating: filters.min_rating,
            max_price: filters.max_price,
            category: filters.category.clone().unwrap_or_default(),
        }
    }

    /// Set the minimum rating from text; returns whether it was accepted
    pub fn set_min_rating(&mut self, text: &str) -> bool {
        self.min_rating = parse_min_rating(text);
        self.min_rating.is_some()
    }

    /// Set the maximum price from text; returns whether it was accepted
    pub fn set_max_price(&mut self, text: &str) -> bool {
        self.max_price = parse_max_price(text);
        self.max_price.is_some()
    }

    /// Set the category; blank text means any category
    pub fn set_category(&mut self, text: &str) {
        text.trim().clone_into(&mut self.category);
    }

    /// Reset every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Currently accepted minimum rating
    #[must_use]
    pub const fn min_rating(&self) -> Option<f64> {
        self.min_rating
    }

    /// Currently accepted maximum price
    #[must_use]
    pub const fn max_price(&self) -> Option<f64> {
        self.max_price
    }

    /// The filters this form describes
    #[must_use]
    pub fn apply(&self) -> ProductFilters {
        ProductFilters {
            min_rating: self.min_rating,
            max_price: self.max_price,
            category: (!self.category.is_empty()).then(|| self.category.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductId, Rating};

    fn product(id: u64, title: &str, price: f64, rate: f64, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price,
            description: String::new(),
            category: category.to_string(),
            image: String::new(),
            rating: Rating { rate, count: 10 },
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Red Shirt", 20.0, 4.0, "Clothing"),
            product(2, "Blue Hat", 5.0, 2.0, "Accessories"),
        ]
    }

    fn titles(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn query_matches_title_case_insensitively() {
        let products = catalog();
        let visible = filter_products(&products, "shirt", &ProductFilters::none());
        assert_eq!(titles(&visible), vec!["Red Shirt"]);
    }

    #[test]
    fn empty_query_and_no_filters_keep_everything_in_order() {
        let products = catalog();
        let visible = filter_products(&products, "", &ProductFilters::none());
        assert_eq!(titles(&visible), vec!["Red Shirt", "Blue Hat"]);
    }

    #[test]
    fn min_rating_is_inclusive() {
        let products = catalog();
        let filters = ProductFilters {
            min_rating: Some(3.0),
            ..ProductFilters::none()
        };
        assert_eq!(titles(&filter_products(&products, "", &filters)), vec!["Red Shirt"]);

        let filters = ProductFilters {
            min_rating: Some(2.0),
            ..ProductFilters::none()
        };
        assert_eq!(filter_products(&products, "", &filters).len(), 2);
    }

    #[test]
    fn max_price_is_inclusive() {
        let products = catalog();
        let filters = ProductFilters {
            max_price: Some(5.0),
            ..ProductFilters::none()
        };
        assert_eq!(titles(&filter_products(&products, "", &filters)), vec!["Blue Hat"]);
    }

    #[test]
    fn category_ignores_case() {
        let products = catalog();
        let filters = ProductFilters {
            category: Some("accessories".to_string()),
            ..ProductFilters::none()
        };
        assert_eq!(titles(&filter_products(&products, "", &filters)), vec!["Blue Hat"]);
    }

    #[test]
    fn all_constraints_must_hold() {
        let products = catalog();
        let filters = ProductFilters {
            min_rating: Some(1.0),
            max_price: Some(100.0),
            category: Some("CLOTHING".to_string()),
        };
        assert!(filter_products(&products, "hat", &filters).is_empty());
        assert_eq!(titles(&filter_products(&products, "RED", &filters)), vec!["Red Shirt"]);
    }

    #[test]
    fn title_matches_handles_empty_query() {
        assert!(title_matches("Anything", ""));
        assert!(title_matches("Mens Casual Slim Fit", "SLIM"));
        assert!(!title_matches("Backpack", "shirt"));
    }

    #[test]
    fn rating_input_outside_range_is_cleared() {
        assert_eq!(parse_min_rating("10"), None);
        assert_eq!(parse_min_rating("-1"), None);
        assert_eq!(parse_min_rating("abc"), None);
        assert_eq!(parse_min_rating("NaN"), None);
        assert_eq!(parse_min_rating(""), None);
        assert_eq!(parse_min_rating("0"), Some(0.0));
        assert_eq!(parse_min_rating(" 4.5 "), Some(4.5));
        assert_eq!(parse_min_rating("5"), Some(5.0));
    }

    #[test]
    fn price_input_must_be_non_negative() {
        assert_eq!(parse_max_price("-10"), None);
        assert_eq!(parse_max_price("inf"), None);
        assert_eq!(parse_max_price("0"), Some(0.0));
        assert_eq!(parse_max_price("19.99"), Some(19.99));
    }

    #[test]
    fn draft_silently_clears_invalid_input() {
        let mut draft = FilterDraft::new();

        assert!(draft.set_min_rating("4"));
        assert!(!draft.set_min_rating("10"));
        assert_eq!(draft.min_rating(), None);

        assert!(draft.set_max_price("50"));
        assert!(!draft.set_max_price("-10"));
        assert_eq!(draft.max_price(), None);

        assert!(draft.apply().is_unconstrained());
    }

    #[test]
    fn draft_applies_accepted_values() {
        let mut draft = FilterDraft::new();
        draft.set_min_rating("3");
        draft.set_max_price("25");
        draft.set_category("  clothing ");

        let filters = draft.apply();
        assert_eq!(filters.min_rating, Some(3.0));
        assert_eq!(filters.max_price, Some(25.0));
        assert_eq!(filters.category.as_deref(), Some("clothing"));

        assert_eq!(FilterDraft::from_filters(&filters), draft);

        draft.set_category("   ");
        assert_eq!(draft.apply().category, None);

        draft.clear();
        assert_eq!(draft, FilterDraft::new());
    }
}
