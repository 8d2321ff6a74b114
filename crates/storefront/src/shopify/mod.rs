//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - GraphQL operations implement `graphql_client::GraphQLQuery` directly
//! - Shopify is source of truth - NO local sync, direct API calls
//! - Header data (shop + menu) is cached in memory via `moka` (5 minute TTL)
//! - Route handlers depend on the [`CommerceApi`] trait, not the concrete
//!   client, so the header can be rendered against a fake in tests
//!
//! # Example
//!
//! ```rust,ignore
//! use uncmfrt_storefront::shopify::{CommerceApi, StorefrontClient};
//!
//! let client = StorefrontClient::new(&config.shopify);
//! let header = client.header("main-menu").await?;
//! println!("{} ({})", header.shop.name, header.shop.primary_domain_url);
//! ```

mod storefront;

pub use storefront::StorefrontClient;

use async_trait::async_trait;
use thiserror::Error;
use uncmfrt_core::{CartId, CartSnapshot, Menu, ShopId};

/// Errors that can occur when interacting with Shopify APIs.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

impl GraphQLError {
    /// An error carrying only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
        }
    }
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Header data
// =============================================================================

/// Shop identity shown in and around the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopInfo {
    pub id: ShopId,
    pub name: String,
    /// Canonical absolute URL of the store (e.g., `https://uncmfrt.com`).
    pub primary_domain_url: String,
}

/// Everything the header needs from one Storefront API round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderData {
    pub shop: ShopInfo,
    /// `None` when the store has no menu with the configured handle.
    pub menu: Option<Menu>,
}

/// Commerce data the header reads.
///
/// Implemented by [`StorefrontClient`]; tests substitute an in-memory fake.
#[async_trait]
pub trait CommerceApi: Send + Sync {
    /// Fetch the shop identity and the header menu.
    async fn header(&self, menu_handle: &str) -> Result<HeaderData, ShopifyError>;

    /// Fetch a cart. `Ok(None)` if the cart no longer exists.
    async fn cart(&self, cart_id: &CartId) -> Result<Option<CartSnapshot>, ShopifyError>;
}
