//! Shopping cart state, actions and reducer.
//!
//! The cart maps product ids to [`CartItem`]s, aggregating repeated adds into a
//! quantity. Every transition leaves earlier [`CartState`] snapshots untouched:
//! the entries live behind an `Arc` and are copied on the first write after a
//! snapshot was taken.
//!
//! # Example
//!
//! ```ignore
//! let (reader, dispatcher) = cart_store().split();
//!
//! dispatcher.dispatch(CartAction::AddToCart(product.clone())).await?;
//! dispatcher.dispatch(CartAction::AddToCart(product)).await?;
//!
//! let totals = reader.read(CartState::totals).await;
//! println!("{totals}"); // Total Item(s): 2, Total Cost: $20.00
//! ```

use crate::error::StorefrontError;
use crate::types::{CartItem, Product, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use storefront_core::{SmallVec, effect::Effect, reducer::Reducer};
use storefront_runtime::{Dispatcher, EffectHandle, StateReader, Store};

// ============================================================================
// Actions
// ============================================================================

/// Inputs accepted by the cart
///
/// Serialized form: `{"type": "ADD_TO_CART", "payload": {...}}`,
/// `{"type": "CLEAR_CART"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add one unit of a product
    AddToCart(Product),
    /// Take one unit away, dropping the line at zero
    DecrementFromCart(ProductId),
    /// Drop the whole line
    RemoveFromCart(ProductId),
    /// Empty the cart
    ClearCart,
}

impl CartAction {
    /// Decode a serialized action
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::MalformedAction`] if `text` is not JSON
    /// - [`StorefrontError::UnhandledAction`] if the JSON is not a known cart
    ///   action; the error carries the action re-serialized
    pub fn from_json(text: &str) -> Result<Self, StorefrontError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Decode an already-parsed action
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::UnhandledAction`] if the value is not a known
    /// cart action.
    pub fn from_value(value: serde_json::Value) -> Result<Self, StorefrontError> {
        serde_json::from_value(value.clone()).map_err(|error| {
            tracing::error!(%error, action = %value, "Unhandled cart action");
            StorefrontError::UnhandledAction {
                action: value.to_string(),
            }
        })
    }
}

// ============================================================================
// State
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
struct CartEntries {
    by_id: HashMap<ProductId, CartItem>,
    order: Vec<ProductId>,
}

/// Cart contents keyed by product id, in insertion order
///
/// Cloning is O(1). Only [`CartReducer`] can change a cart; readers get
/// snapshots.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CartState {
    entries: Arc<CartEntries>,
}

impl CartState {
    /// An empty cart
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct products
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.order.len()
    }

    /// True when the cart holds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.order.is_empty()
    }

    /// The line for `id`, if present
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.entries.by_id.get(&id)
    }

    /// True when `id` has a line
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.entries.by_id.contains_key(&id)
    }

    /// Units of `id` in the cart, 0 when absent
    #[must_use]
    pub fn quantity(&self, id: ProductId) -> u64 {
        self.get(id).map_or(0, |item| item.quantity)
    }

    /// Lines in the order their products were first added
    pub fn items(&self) -> impl Iterator<Item = &CartItem> + '_ {
        self.entries
            .order
            .iter()
            .filter_map(|id| self.entries.by_id.get(id))
    }

    /// Sum of quantities
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items()
            .fold(0_u64, |total, item| total.saturating_add(item.quantity))
    }

    /// Sum of `price × quantity`
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.items().map(CartItem::line_total).sum()
    }

    /// Both aggregates, for display
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            items: self.total_items(),
            cost: self.total_cost(),
        }
    }

    /// True when both states share the same entry storage
    #[must_use]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// Add one unit, storing the given product fields. Returns the new quantity.
    pub(crate) fn add(&mut self, product: Product) -> u64 {
        let entries = Arc::make_mut(&mut self.entries);
        let id = product.id;

        match entries.by_id.get_mut(&id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1);
                item.product = product;
                item.quantity
            },
            None => {
                entries.order.push(id);
                entries.by_id.insert(
                    id,
                    CartItem {
                        product,
                        quantity: 1,
                    },
                );
                1
            },
        }
    }

    /// Remove one unit. Returns the remaining quantity; 0 means the line is gone.
    pub(crate) fn decrement(&mut self, id: ProductId) -> u64 {
        match self.quantity(id) {
            0 => 0,
            1 => {
                self.remove(id);
                0
            },
            _ => {
                let entries = Arc::make_mut(&mut self.entries);
                entries.by_id.get_mut(&id).map_or(0, |item| {
                    item.quantity -= 1;
                    item.quantity
                })
            },
        }
    }

    /// Drop the line for `id`. Returns whether one existed.
    pub(crate) fn remove(&mut self, id: ProductId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let entries = Arc::make_mut(&mut self.entries);
        entries.by_id.remove(&id);
        entries.order.retain(|existing| *existing != id);
        true
    }

    pub(crate) fn clear(&mut self) {
        if !self.is_empty() {
            self.entries = Arc::default();
        }
    }
}

/// Derived cart aggregates
///
/// Displays as `Total Item(s): 2, Total Cost: $20.00`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CartTotals {
    /// Sum of quantities
    pub items: u64,
    /// Sum of line totals in USD
    pub cost: f64,
}

impl fmt::Display for CartTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total Item(s): {}, Total Cost: ${:.2}",
            self.items, self.cost
        )
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Cart transitions; no effects, no environment
#[derive(Clone, Copy, Debug, Default)]
pub struct CartReducer;

impl CartReducer {
    /// Creates a new `CartReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::AddToCart(product) => {
                let product_id = product.id;
                let quantity = state.add(product);
                tracing::debug!(%product_id, quantity, "Added to cart");
            },
            CartAction::DecrementFromCart(product_id) => {
                let quantity = state.decrement(product_id);
                tracing::debug!(%product_id, quantity, "Decremented cart line");
            },
            CartAction::RemoveFromCart(product_id) => {
                let removed = state.remove(product_id);
                tracing::debug!(%product_id, removed, "Removed cart line");
            },
            CartAction::ClearCart => {
                state.clear();
                tracing::debug!("Cleared cart");
            },
        }

        SmallVec::new()
    }
}

// ============================================================================
// Store
// ============================================================================

/// Store running the cart reducer
pub type CartStore = Store<CartState, CartAction, (), CartReducer>;

/// Read capability of the cart store
pub type CartReader = StateReader<CartState>;

/// Write capability of the cart store
pub type CartDispatcher = Dispatcher<CartState, CartAction, (), CartReducer>;

/// A store holding an empty cart
#[must_use]
pub fn cart_store() -> CartStore {
    Store::new(CartState::new(), CartReducer::new(), ())
}

/// Decode a serialized action and dispatch it
///
/// # Errors
///
/// Returns the decode errors of [`CartAction::from_json`], or
/// [`StorefrontError::Store`] if the store is shutting down.
pub async fn dispatch_json(
    dispatcher: &CartDispatcher,
    text: &str,
) -> Result<EffectHandle, StorefrontError> {
    let action = CartAction::from_json(text)?;
    Ok(dispatcher.dispatch(action).await?)
}
