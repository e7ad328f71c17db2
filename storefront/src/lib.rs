//! # Storefront
//!
//! Domain logic of a small storefront: a product catalog fetched from a JSON
//! endpoint, a search-and-filter listing over it, and a shopping cart.
//!
//! Each feature is a reducer run by a [`storefront_runtime::Store`]:
//!
//! - [`cart`]: quantity-aggregated cart with copy-on-write snapshots
//! - [`catalog`]: catalog loading through a [`catalog::ProductSource`]
//! - [`browse`]: debounced search text and applied filters
//!
//! [`filter`] holds the pure product filter used by the listing.
//!
//! ## Example
//!
//! ```ignore
//! use storefront::cart::{CartAction, CartState, cart_store};
//!
//! let (reader, dispatcher) = cart_store().split();
//! dispatcher.dispatch(CartAction::AddToCart(product)).await?;
//! assert_eq!(reader.read(CartState::total_items).await, 1);
//! ```

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod types;

pub use cart::{CartAction, CartReducer, CartState, CartTotals};
pub use config::StorefrontConfig;
pub use error::{CatalogError, StorefrontError};
pub use filter::{FilterDraft, ProductFilters, filter_products};
pub use types::{CartItem, Product, ProductId, RATING_MAX, Rating};
