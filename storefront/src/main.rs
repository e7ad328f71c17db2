//! Storefront demo.
//!
//! Loads the catalog, prints the listing narrowed by an optional search
//! argument, puts the first listed products in a cart and prints the totals.
//!
//! ```text
//! storefront [QUERY]
//! ```

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use storefront::browse::{BrowseAction, BrowseEnvironment, browse_store};
use storefront::cart::{CartAction, CartState, cart_store};
use storefront::catalog::{CatalogAction, CatalogEnvironment, HttpProductSource, catalog_store};
use storefront::{Product, StorefrontConfig};
use storefront_core::environment::SystemClock;
use storefront_runtime::metrics::describe_store_metrics;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn render_stars(product: &Product) -> String {
    product
        .rating
        .stars()
        .iter()
        .map(|filled| if *filled { '★' } else { '☆' })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    describe_store_metrics();
    info!(catalog_url = %config.catalog_url, "Configuration loaded");

    // Catalog
    let source = HttpProductSource::from_config(&config)?;
    let catalog = catalog_store(CatalogEnvironment::new(
        Arc::new(source),
        Arc::new(SystemClock),
    ));

    let mut loading = catalog.send(CatalogAction::LoadRequested).await?;
    loading
        .wait_with_timeout(config.request_timeout() + Duration::from_secs(1))
        .await
        .context("catalog load did not finish")?;

    let catalog_state = catalog.snapshot().await;
    if let Some(message) = catalog_state.error() {
        anyhow::bail!("Error: {message}");
    }
    if catalog_state.products.is_empty() {
        println!("No products available");
        return Ok(());
    }

    // Listing
    let browse = browse_store(BrowseEnvironment::new(config.search_debounce()));
    let query = std::env::args().nth(1).unwrap_or_default();
    let mut settling = browse.send(BrowseAction::QueryChanged(query)).await?;
    settling
        .wait_with_timeout(config.search_debounce() + Duration::from_secs(1))
        .await?;

    let visible: Vec<Product> = browse
        .state(|state| {
            state
                .visible(&catalog_state.products)
                .into_iter()
                .cloned()
                .collect()
        })
        .await;

    println!("Categories: {}", catalog_state.categories().join(", "));
    for product in &visible {
        println!(
            "{:>4}  {}  ${:>8.2}  {}",
            product.id,
            render_stars(product),
            product.price,
            product.title
        );
    }

    // Cart
    let store = cart_store();
    let (reader, dispatcher) = store.split();

    for product in visible.iter().take(2) {
        dispatcher
            .dispatch(CartAction::AddToCart(product.clone()))
            .await?;
    }
    if let Some(first) = visible.first() {
        dispatcher
            .dispatch(CartAction::AddToCart(first.clone()))
            .await?;
    }

    let cart = reader.snapshot().await;
    for item in cart.items() {
        println!("{} x{}", item.product.title, item.quantity);
    }
    println!("{}", reader.read(CartState::totals).await);

    store.shutdown(Duration::from_secs(1)).await?;
    Ok(())
}
