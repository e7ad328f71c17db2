//! Catalog and cart value types.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Catalog-assigned product identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw catalog id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw catalog id
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Product
// ============================================================================

/// Highest possible rating (number of stars shown)
pub const RATING_MAX: u8 = 5;

/// Customer rating summary
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating, 0 to [`RATING_MAX`]
    pub rate: f64,
    /// Number of ratings
    pub count: u64,
}

impl Rating {
    /// Filled flag per star, first star first
    ///
    /// Star `i` (1-based) is filled when `i <= rate`.
    #[must_use]
    pub fn stars(&self) -> [bool; RATING_MAX as usize] {
        let mut stars = [false; RATING_MAX as usize];
        for (i, star) in (1..=RATING_MAX).zip(stars.iter_mut()) {
            *star = f64::from(i) <= self.rate;
        }
        stars
    }
}

/// A catalog entry
///
/// Produced by the catalog fetch and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique id
    pub id: ProductId,
    /// Display title
    pub title: String,
    /// Unit price in USD
    pub price: f64,
    /// Long description
    pub description: String,
    /// Category name, compared case-insensitively
    pub category: String,
    /// Image URI
    pub image: String,
    /// Rating summary
    pub rating: Rating,
}

// ============================================================================
// Cart
// ============================================================================

/// A product in the cart together with its quantity
///
/// Serializes flat, the product's fields next to `quantity`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product as it was last added
    #[serde(flatten)]
    pub product: Product,
    /// Units in the cart, at least 1
    pub quantity: u64,
}

impl CartItem {
    /// The product's id
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// `price × quantity`
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // quantities stay far below 2^53
    pub fn line_total(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}
