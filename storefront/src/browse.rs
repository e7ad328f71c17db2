//! Listing criteria: debounced search text plus applied filters.

use crate::filter::{FilterDraft, ProductFilters, filter_products};
use crate::types::Product;
use std::time::Duration;
use storefront_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use storefront_runtime::Store;

/// What the product listing is narrowed by
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrowseState {
    /// Text as typed
    pub query: String,
    /// Text the listing currently uses
    pub settled_query: String,
    /// Bumped on every keystroke; stale settle timers carry an older value
    pub generation: u64,
    /// Applied filters
    pub filters: ProductFilters,
}

impl BrowseState {
    /// Creates a new `BrowseState`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while typed text has not settled yet
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.query != self.settled_query
    }

    /// Products to list, in catalog order
    #[must_use]
    pub fn visible<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        filter_products(products, &self.settled_query, &self.filters)
    }
}

/// Inputs accepted by the listing
#[derive(Clone, Debug, PartialEq)]
pub enum BrowseAction {
    /// Search text edited
    QueryChanged(String),
    /// Debounce timer fired for the given keystroke
    QuerySettled {
        /// Generation the timer was started for
        generation: u64,
    },
    /// Filter form submitted
    FiltersApplied(FilterDraft),
    /// Filter form reset
    FiltersCleared,
}

/// Dependencies of the browse reducer
#[derive(Clone, Copy, Debug)]
pub struct BrowseEnvironment {
    /// Quiet period before typed text is used
    pub debounce: Duration,
}

impl BrowseEnvironment {
    /// Creates a new `BrowseEnvironment`
    #[must_use]
    pub const fn new(debounce: Duration) -> Self {
        Self { debounce }
    }
}

/// Search and filter transitions
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowseReducer;

impl Reducer for BrowseReducer {
    type State = BrowseState;
    type Action = BrowseAction;
    type Environment = BrowseEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            BrowseAction::QueryChanged(query) => {
                state.query = query;
                state.generation = state.generation.wrapping_add(1);

                smallvec![Effect::Delay {
                    duration: env.debounce,
                    action: Box::new(BrowseAction::QuerySettled {
                        generation: state.generation,
                    }),
                }]
            },
            BrowseAction::QuerySettled { generation } => {
                if generation == state.generation {
                    state.settled_query.clone_from(&state.query);
                    tracing::debug!(query = %state.settled_query, "Search settled");
                } else {
                    tracing::trace!(generation, current = state.generation, "Stale search timer");
                }
                SmallVec::new()
            },
            BrowseAction::FiltersApplied(draft) => {
                state.filters = draft.apply();
                tracing::debug!(filters = ?state.filters, "Filters applied");
                SmallVec::new()
            },
            BrowseAction::FiltersCleared => {
                state.filters = ProductFilters::none();
                SmallVec::new()
            },
        }
    }
}

/// Store running the browse reducer
pub type BrowseStore = Store<BrowseState, BrowseAction, BrowseEnvironment, BrowseReducer>;

/// A store with no query and no filters
#[must_use]
pub fn browse_store(environment: BrowseEnvironment) -> BrowseStore {
    Store::new(BrowseState::new(), BrowseReducer, environment)
}
