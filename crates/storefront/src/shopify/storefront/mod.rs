//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` query bodies with `reqwest` 0.13 for HTTP.
//! Caches header data using `moka` (5-minute TTL).

pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use secrecy::ExposeSecret;
use tracing::{debug, instrument};
use uncmfrt_core::{CartId, CartSnapshot};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::{CommerceApi, GraphQLError, GraphQLErrorLocation, HeaderData, ShopifyError};

use queries::{CartQuery, HeaderQuery, cart_query, header_query};

/// Longest slice of a response body copied into logs and errors.
const BODY_SNIPPET_LEN: usize = 500;

fn snippet(body: &str, len: usize) -> String {
    body.chars().take(len).collect()
}

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Header data is cached for 5 minutes per menu handle. Carts are always
/// fetched fresh.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    header_cache: Cache<String, HeaderData>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        let endpoint = format!(
            "https://{}/api/{}/graphql.json",
            config.store, config.api_version
        );
        Self::with_endpoint(
            endpoint,
            config.storefront_private_token.expose_secret().to_string(),
        )
    }

    /// Create a client against an explicit GraphQL endpoint.
    #[must_use]
    pub fn with_endpoint(endpoint: String, access_token: String) -> Self {
        let header_cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token,
                header_cache,
            }),
        }
    }

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private access tokens use a different header than public tokens
            .header(
                "Shopify-Storefront-Private-Token",
                &self.inner.access_token,
            )
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Read as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %snippet(&response_text, BODY_SNIPPET_LEN),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![GraphQLError::message(format!(
                "HTTP {status}: {}",
                snippet(&response_text, 200)
            ))]));
        }

        let response: Response<Q::ResponseData> = serde_json::from_str(&response_text)
            .inspect_err(|e| {
                tracing::error!(
                    error = %e,
                    body = %snippet(&response_text, BODY_SNIPPET_LEN),
                    "Failed to parse Shopify GraphQL response"
                );
            })?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(convert_graphql_error).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %snippet(&response_text, BODY_SNIPPET_LEN),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::GraphQL(vec![GraphQLError::message("No data in response")])
        })
    }
}

fn convert_graphql_error(e: graphql_client::Error) -> GraphQLError {
    GraphQLError {
        message: e.message,
        locations: e.locations.map_or_else(Vec::new, |locs| {
            locs.into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: i64::from(l.line),
                    column: i64::from(l.column),
                })
                .collect()
        }),
        path: e.path.map_or_else(Vec::new, |p| {
            p.into_iter()
                .map(|fragment| match fragment {
                    graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                    graphql_client::PathFragment::Index(i) => serde_json::Value::Number(i.into()),
                })
                .collect()
        }),
    }
}

#[async_trait]
impl CommerceApi for StorefrontClient {
    #[instrument(skip(self))]
    async fn header(&self, menu_handle: &str) -> Result<HeaderData, ShopifyError> {
        if let Some(cached) = self.inner.header_cache.get(menu_handle).await {
            debug!("Cache hit for header");
            return Ok(cached);
        }

        let data = self
            .execute::<HeaderQuery>(header_query::Variables {
                header_menu_handle: menu_handle.to_string(),
            })
            .await?;
        let header = HeaderData::from(data);

        if header.menu.is_none() {
            debug!("Store has no menu with this handle, header uses the fallback menu");
        }

        self.inner
            .header_cache
            .insert(menu_handle.to_string(), header.clone())
            .await;

        Ok(header)
    }

    #[instrument(skip(self), fields(cart_id = %cart_id))]
    async fn cart(&self, cart_id: &CartId) -> Result<Option<CartSnapshot>, ShopifyError> {
        let data = self
            .execute::<CartQuery>(cart_query::Variables {
                cart_id: cart_id.clone(),
            })
            .await?;
        Ok(data.cart)
    }
}
