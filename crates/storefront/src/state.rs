//! Application state shared across handlers.

use std::sync::Arc;

use uncmfrt_core::ShopId;

use crate::config::StorefrontConfig;
use crate::header::links::NormalizationContext;
use crate::services::analytics::{AnalyticsPublisher, ShopAnalytics};
use crate::shopify::CommerceApi;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the external collaborators of the header.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    commerce: Arc<dyn CommerceApi>,
    analytics: Arc<dyn AnalyticsPublisher>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `commerce` - Shopify Storefront API (or a fake in tests)
    /// * `analytics` - Analytics event sink
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        commerce: Arc<dyn CommerceApi>,
        analytics: Arc<dyn AnalyticsPublisher>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                commerce,
                analytics,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the commerce API.
    #[must_use]
    pub fn commerce(&self) -> &Arc<dyn CommerceApi> {
        &self.inner.commerce
    }

    /// Get the analytics publisher.
    #[must_use]
    pub fn analytics(&self) -> &dyn AnalyticsPublisher {
        self.inner.analytics.as_ref()
    }

    /// Link normalization context for a shop with the given primary domain.
    #[must_use]
    pub fn normalization_context(&self, primary_domain_url: &str) -> NormalizationContext {
        NormalizationContext::new(
            self.config().shopify.public_store_domain.clone(),
            primary_domain_url,
        )
    }

    /// Shop identification attached to analytics events.
    #[must_use]
    pub fn shop_analytics(&self, shop_id: ShopId) -> ShopAnalytics {
        let analytics = &self.config().analytics;
        ShopAnalytics {
            shop_id,
            accepted_language: analytics.language.clone(),
            currency: analytics.currency.clone(),
        }
    }
}
