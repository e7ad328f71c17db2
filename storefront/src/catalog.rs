//! Product catalog: loading state, lookups and product sources.
//!
//! [`CatalogReducer`] drives a load through the environment's
//! [`ProductSource`]: `LoadRequested` starts a fetch effect, which feeds back
//! `ProductsLoaded` or `LoadFailed`.

use crate::config::StorefrontConfig;
use crate::error::CatalogError;
use crate::types::{Product, ProductId};
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use storefront_core::environment::Clock;
use storefront_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use storefront_runtime::Store;

// ============================================================================
// Product sources
// ============================================================================

/// Something that can produce the product list
pub trait ProductSource: Send + Sync {
    /// Fetch the full catalog
    fn fetch_products(&self) -> BoxFuture<'static, Result<Vec<Product>, CatalogError>>;
}

/// Product source backed by a JSON listing endpoint
#[derive(Clone, Debug)]
pub struct HttpProductSource {
    client: Client,
    url: String,
}

impl HttpProductSource {
    /// Create a source for `url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RequestFailed`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Create a source from application configuration
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RequestFailed`] if the HTTP client cannot be built.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        Self::new(config.catalog_url.clone(), config.request_timeout())
    }

    /// The endpoint this source reads
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ProductSource for HttpProductSource {
    fn fetch_products(&self) -> BoxFuture<'static, Result<Vec<Product>, CatalogError>> {
        let client = self.client.clone();
        let url = self.url.clone();

        Box::pin(async move {
            tracing::debug!(%url, "Fetching catalog");

            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| CatalogError::RequestFailed(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(CatalogError::Status {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or_default().to_string(),
                });
            }

            let products = response
                .json::<Vec<Product>>()
                .await
                .map_err(|e| CatalogError::ResponseParseFailed(e.to_string()))?;

            tracing::info!(count = products.len(), "Catalog fetched");
            Ok(products)
        })
    }
}

/// Product source serving a fixed result
#[derive(Clone, Debug)]
pub struct InMemoryProductSource {
    result: Result<Arc<[Product]>, CatalogError>,
}

impl InMemoryProductSource {
    /// Serve `products` on every fetch
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            result: Ok(products.into()),
        }
    }

    /// Fail every fetch with `error`
    #[must_use]
    pub const fn failing(error: CatalogError) -> Self {
        Self { result: Err(error) }
    }
}

impl ProductSource for InMemoryProductSource {
    fn fetch_products(&self) -> BoxFuture<'static, Result<Vec<Product>, CatalogError>> {
        let result = self
            .result
            .as_ref()
            .map(|products| products.to_vec())
            .map_err(Clone::clone);
        Box::pin(async move { result })
    }
}

// ============================================================================
// State
// ============================================================================

/// Progress of the latest catalog load
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded
    Loaded,
    /// The last fetch failed with this message
    Failed(String),
}

/// The product registry
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogState {
    /// Products in listing order
    pub products: Vec<Product>,
    /// Progress of the latest load
    pub status: LoadStatus,
    /// When products were last stored
    pub loaded_at: Option<DateTime<Utc>>,
}

impl CatalogState {
    /// An empty, idle catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a fetch is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Message of the last failed load
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Product with `id`
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Listing index of `id`
    #[must_use]
    pub fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|product| product.id == id)
    }

    /// Previous and next products around `id`, for swiping through details
    ///
    /// `None` when `id` is not in the catalog.
    #[must_use]
    pub fn neighbors(&self, id: ProductId) -> Option<(Option<&Product>, Option<&Product>)> {
        let index = self.position(id)?;
        let previous = index.checked_sub(1).and_then(|i| self.products.get(i));
        let next = self.products.get(index + 1);
        Some((previous, next))
    }

    /// Distinct categories, sorted, first-seen spelling kept
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut categories: Vec<&str> = self
            .products
            .iter()
            .map(|product| product.category.as_str())
            .filter(|category| seen.insert(category.to_lowercase()))
            .collect();
        categories.sort_by_key(|category| category.to_lowercase());
        categories
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Inputs accepted by the catalog
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogAction {
    /// Start a load (ignored while one is in flight)
    LoadRequested,
    /// A load finished with these products
    ProductsLoaded(Vec<Product>),
    /// A load failed
    LoadFailed(String),
    /// Replace the products directly
    ProductsReplaced(Vec<Product>),
}

// ============================================================================
// Environment & Reducer
// ============================================================================

/// Dependencies of the catalog reducer
#[derive(Clone)]
pub struct CatalogEnvironment {
    /// Where products come from
    pub source: Arc<dyn ProductSource>,
    /// Clock for `loaded_at`
    pub clock: Arc<dyn Clock>,
}

impl CatalogEnvironment {
    /// Creates a new `CatalogEnvironment`
    #[must_use]
    pub fn new(source: Arc<dyn ProductSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }
}

/// Catalog loading transitions
#[derive(Clone, Copy, Debug, Default)]
pub struct CatalogReducer;

impl CatalogReducer {
    /// Creates a new `CatalogReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CatalogReducer {
    type State = CatalogState;
    type Action = CatalogAction;
    type Environment = CatalogEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CatalogAction::LoadRequested => {
                if state.is_loading() {
                    tracing::debug!("Catalog load already in flight");
                    return SmallVec::new();
                }

                state.status = LoadStatus::Loading;
                let source = Arc::clone(&env.source);

                smallvec![Effect::future(async move {
                    match source.fetch_products().await {
                        Ok(products) => Some(CatalogAction::ProductsLoaded(products)),
                        Err(error) => Some(CatalogAction::LoadFailed(error.to_string())),
                    }
                })]
            },
            CatalogAction::ProductsLoaded(products) | CatalogAction::ProductsReplaced(products) => {
                tracing::debug!(count = products.len(), "Catalog products stored");
                state.products = products;
                state.status = LoadStatus::Loaded;
                state.loaded_at = Some(env.clock.now());
                SmallVec::new()
            },
            CatalogAction::LoadFailed(message) => {
                tracing::warn!(error = %message, "Catalog load failed");
                state.status = LoadStatus::Failed(message);
                SmallVec::new()
            },
        }
    }
}

/// Store running the catalog reducer
pub type CatalogStore = Store<CatalogState, CatalogAction, CatalogEnvironment, CatalogReducer>;

/// A store holding an idle, empty catalog
#[must_use]
pub fn catalog_store(environment: CatalogEnvironment) -> CatalogStore {
    Store::new(CatalogState::new(), CatalogReducer::new(), environment)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Rating;
    use storefront_testing::{ReducerTest, assertions, resolve_effects, test_clock};

    fn product(id: u64, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: 10.0,
            description: String::new(),
            category: category.to_string(),
            image: String::new(),
            rating: Rating {
                rate: 3.0,
                count: 1,
            },
        }
    }

    fn env_with(source: InMemoryProductSource) -> CatalogEnvironment {
        CatalogEnvironment::new(Arc::new(source), Arc::new(test_clock()))
    }

    fn loaded(products: Vec<Product>) -> CatalogState {
        CatalogState {
            products,
            status: LoadStatus::Loaded,
            loaded_at: None,
        }
    }

    #[test]
    fn load_requested_starts_fetch() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(env_with(InMemoryProductSource::new(vec![])))
            .given_state(CatalogState::new())
            .when_action(CatalogAction::LoadRequested)
            .then_state(|state| assert!(state.is_loading()))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn load_requested_while_loading_is_ignored() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(env_with(InMemoryProductSource::new(vec![])))
            .given_state(CatalogState {
                status: LoadStatus::Loading,
                ..CatalogState::new()
            })
            .when_action(CatalogAction::LoadRequested)
            .then_state(|state| assert!(state.is_loading()))
            .then_effects(|effects| assertions::assert_effects_count(effects, 0))
            .run();
    }

    #[tokio::test]
    async fn fetch_effect_feeds_back_loaded_products() {
        let env = env_with(InMemoryProductSource::new(vec![product(1, "a"), product(2, "b")]));
        let mut state = CatalogState::new();

        let effects = CatalogReducer.reduce(&mut state, CatalogAction::LoadRequested, &env);
        let actions = resolve_effects(effects).await;

        assert_eq!(actions.len(), 1);
        assert!(matches!(&actions[0], CatalogAction::ProductsLoaded(p) if p.len() == 2));
    }

    #[tokio::test]
    async fn fetch_effect_feeds_back_failure_message() {
        let env = env_with(InMemoryProductSource::failing(CatalogError::Status {
            status: 500,
            reason: "Internal Server Error".to_string(),
        }));
        let mut state = CatalogState::new();

        let effects = CatalogReducer.reduce(&mut state, CatalogAction::LoadRequested, &env);
        let actions = resolve_effects(effects).await;

        assert_eq!(
            actions,
            vec![CatalogAction::LoadFailed(
                "Network response failed with status: Internal Server Error".to_string()
            )]
        );
    }

    #[test]
    fn products_loaded_records_time() {
        let expected = test_clock().now();

        ReducerTest::new(CatalogReducer::new())
            .with_env(env_with(InMemoryProductSource::new(vec![])))
            .given_state(CatalogState {
                status: LoadStatus::Loading,
                ..CatalogState::new()
            })
            .when_action(CatalogAction::ProductsLoaded(vec![product(1, "a")]))
            .then_state(move |state| {
                assert_eq!(state.status, LoadStatus::Loaded);
                assert_eq!(state.products.len(), 1);
                assert_eq!(state.loaded_at, Some(expected));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn failure_keeps_previous_products() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(env_with(InMemoryProductSource::new(vec![])))
            .given_state(loaded(vec![product(1, "a")]))
            .when_actions([
                CatalogAction::LoadRequested,
                CatalogAction::LoadFailed("Request failed: timeout".to_string()),
            ])
            .then_state(|state| {
                assert_eq!(state.error(), Some("Request failed: timeout"));
                assert_eq!(state.products.len(), 1);
            })
            .run();
    }

    #[test]
    fn products_replaced_overwrites_list() {
        ReducerTest::new(CatalogReducer::new())
            .with_env(env_with(InMemoryProductSource::new(vec![])))
            .given_state(loaded(vec![product(1, "a"), product(2, "a")]))
            .when_action(CatalogAction::ProductsReplaced(vec![product(3, "b")]))
            .then_state(|state| {
                assert_eq!(state.products.len(), 1);
                assert!(state.get(ProductId::new(3)).is_some());
                assert!(state.get(ProductId::new(1)).is_none());
            })
            .run();
    }

    #[test]
    fn neighbors_follow_listing_order() {
        let state = loaded(vec![product(10, "a"), product(20, "a"), product(30, "a")]);

        let (previous, next) = state.neighbors(ProductId::new(10)).unwrap();
        assert!(previous.is_none());
        assert_eq!(next.unwrap().id, ProductId::new(20));

        let (previous, next) = state.neighbors(ProductId::new(30)).unwrap();
        assert_eq!(previous.unwrap().id, ProductId::new(20));
        assert!(next.is_none());

        assert_eq!(state.position(ProductId::new(20)), Some(1));
        assert!(state.neighbors(ProductId::new(99)).is_none());
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        let state = loaded(vec![
            product(1, "jewelery"),
            product(2, "Electronics"),
            product(3, "electronics"),
            product(4, "men's clothing"),
        ]);

        assert_eq!(
            state.categories(),
            vec!["Electronics", "jewelery", "men's clothing"]
        );
    }
}
