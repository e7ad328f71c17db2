//! Error types for the storefront domain

use storefront_runtime::StoreError;
use thiserror::Error;

/// Errors surfaced by storefront operations
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// A serialized cart action whose `type` or payload is not recognized
    ///
    /// Carries the serialized action so the offending caller can be found.
    #[error("Unhandled cart action: {action}")]
    UnhandledAction {
        /// The action as received, re-serialized as JSON
        action: String,
    },

    /// Action text that is not JSON at all
    #[error("Malformed cart action: {0}")]
    MalformedAction(#[from] serde_json::Error),

    /// The store rejected the action
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Loading the catalog failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors from a product source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog endpoint answered with a non-success status
    #[error("Network response failed with status: {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        reason: String,
    },

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body was not a product list
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),
}
