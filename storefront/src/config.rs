//! Configuration management for the storefront.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Values that fail to parse fall back to the default.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default catalog endpoint
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Product listing endpoint (`STOREFRONT_CATALOG_URL`)
    pub catalog_url: String,
    /// Catalog request timeout in seconds (`STOREFRONT_REQUEST_TIMEOUT_SECS`)
    pub request_timeout_secs: u64,
    /// Search box debounce in milliseconds (`STOREFRONT_SEARCH_DEBOUNCE_MS`)
    pub search_debounce_ms: u64,
    /// Log level: trace, debug, info, warn, error (`STOREFRONT_LOG_LEVEL`)
    pub log_level: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            catalog_url: lookup("STOREFRONT_CATALOG_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            request_timeout_secs: lookup("STOREFRONT_REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(10),
            search_debounce_ms: lookup("STOREFRONT_SEARCH_DEBOUNCE_MS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(400),
            log_level: lookup("STOREFRONT_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Catalog request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Search box debounce delay
    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Default `tracing` filter directive for the storefront crates
    #[must_use]
    pub fn default_log_filter(&self) -> String {
        format!(
            "storefront={level},storefront_runtime={level}",
            level = self.log_level
        )
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = StorefrontConfig::default();

        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.search_debounce(), Duration::from_millis(400));
        assert_eq!(
            config.default_log_filter(),
            "storefront=info,storefront_runtime=info"
        );
    }

    #[test]
    fn reads_overrides() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("STOREFRONT_CATALOG_URL", "http://localhost:8080/products"),
            ("STOREFRONT_REQUEST_TIMEOUT_SECS", "3"),
            ("STOREFRONT_SEARCH_DEBOUNCE_MS", "0"),
            ("STOREFRONT_LOG_LEVEL", "debug"),
        ]));

        assert_eq!(config.catalog_url, "http://localhost:8080/products");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.search_debounce_ms, 0);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn unparseable_values_fall_back() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("STOREFRONT_CATALOG_URL", "  "),
            ("STOREFRONT_REQUEST_TIMEOUT_SECS", "soon"),
            ("STOREFRONT_SEARCH_DEBOUNCE_MS", "-5"),
        ]));

        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.search_debounce_ms, 400);
    }

    #[test]
    fn zero_timeout_falls_back() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[(
            "STOREFRONT_REQUEST_TIMEOUT_SECS",
            "0",
        )]));

        assert_eq!(config.request_timeout_secs, 10);
    }
}
