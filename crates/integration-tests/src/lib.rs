//! Integration test support for the UNCMFRT storefront.
//!
//! Tests drive the real router in-process with `tower::ServiceExt::oneshot`.
//! Shopify and the analytics collector are replaced by the fakes below, and
//! sessions are seeded straight into the `MemoryStore` the router uses.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p uncmfrt-integration-tests
//! ```

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, header};
use secrecy::SecretString;
use tower::ServiceExt;
use tower_sessions::cookie::time::{Duration as CookieDuration, OffsetDateTime};
use tower_sessions::session::{Id, Record};
use tower_sessions::{MemoryStore, SessionStore};
use uncmfrt_core::{CartId, CartSnapshot, Menu, ShopId};
use uncmfrt_storefront::config::{
    AnalyticsConfig, HeaderConfig, ShopifyStorefrontConfig, StorefrontConfig,
};
use uncmfrt_storefront::middleware::session::SESSION_COOKIE_NAME;
use uncmfrt_storefront::services::analytics::{AnalyticsPayload, AnalyticsPublisher};
use uncmfrt_storefront::shopify::{CommerceApi, HeaderData, ShopInfo, ShopifyError};
use uncmfrt_storefront::state::AppState;

/// Shop domain used by every fake.
pub const PUBLIC_STORE_DOMAIN: &str = "uncmfrt.com";

/// Primary domain reported by the fake shop.
pub const PRIMARY_DOMAIN_URL: &str = "https://uncmfrt.com";

/// Configuration for tests: no Sentry, no collector, a short defer budget.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        shopify: ShopifyStorefrontConfig {
            store: "uncmfrt.myshopify.com".to_string(),
            public_store_domain: PUBLIC_STORE_DOMAIN.to_string(),
            api_version: "2026-01".to_string(),
            storefront_private_token: SecretString::from("shpat_test_token"),
        },
        header: HeaderConfig {
            defer_budget: Duration::from_millis(50),
            ..HeaderConfig::default()
        },
        analytics: AnalyticsConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

// =============================================================================
// Fakes
// =============================================================================

/// In-memory stand-in for the Shopify Storefront API.
#[derive(Debug, Default)]
pub struct FakeCommerce {
    menu: Option<Menu>,
    header_fails: bool,
    carts: HashMap<String, CartSnapshot>,
    cart_delay: Option<Duration>,
    cart_fails: bool,
}

impl FakeCommerce {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `menu` as the header menu.
    #[must_use]
    pub fn with_menu(mut self, menu: Menu) -> Self {
        self.menu = Some(menu);
        self
    }

    /// Fail every header query.
    #[must_use]
    pub const fn with_failing_header(mut self) -> Self {
        self.header_fails = true;
        self
    }

    #[must_use]
    pub fn with_cart(mut self, cart: CartSnapshot) -> Self {
        if let Some(id) = &cart.id {
            self.carts.insert(id.as_str().to_string(), cart);
        }
        self
    }

    /// Delay every cart lookup.
    #[must_use]
    pub const fn with_cart_delay(mut self, delay: Duration) -> Self {
        self.cart_delay = Some(delay);
        self
    }

    /// Fail every cart lookup.
    #[must_use]
    pub const fn with_failing_cart(mut self) -> Self {
        self.cart_fails = true;
        self
    }
}

#[async_trait]
impl CommerceApi for FakeCommerce {
    async fn header(&self, _menu_handle: &str) -> Result<HeaderData, ShopifyError> {
        if self.header_fails {
            return Err(ShopifyError::RateLimited(1));
        }
        Ok(HeaderData {
            shop: ShopInfo {
                id: ShopId::new("gid://shopify/Shop/68822335800"),
                name: "UNCMFRT".to_string(),
                primary_domain_url: PRIMARY_DOMAIN_URL.to_string(),
            },
            menu: self.menu.clone(),
        })
    }

    async fn cart(&self, cart_id: &CartId) -> Result<Option<CartSnapshot>, ShopifyError> {
        if let Some(delay) = self.cart_delay {
            tokio::time::sleep(delay).await;
        }
        if self.cart_fails {
            return Err(ShopifyError::NotFound(cart_id.to_string()));
        }
        Ok(self.carts.get(cart_id.as_str()).cloned())
    }
}

/// Analytics publisher that keeps every event.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<(&'static str, AnalyticsPayload)>>,
}

impl RecordingPublisher {
    /// Events published so far.
    #[must_use]
    pub fn events(&self) -> Vec<(&'static str, AnalyticsPayload)> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AnalyticsPublisher for RecordingPublisher {
    fn publish(&self, name: &'static str, payload: AnalyticsPayload) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((name, payload));
    }
}

// =============================================================================
// Harness
// =============================================================================

/// A storefront router wired to fakes.
pub struct TestApp {
    pub router: Router,
    pub analytics: Arc<RecordingPublisher>,
    pub sessions: MemoryStore,
}

impl TestApp {
    #[must_use]
    pub fn new(commerce: FakeCommerce) -> Self {
        Self::with_config(test_config(), commerce)
    }

    #[must_use]
    pub fn with_config(config: StorefrontConfig, commerce: FakeCommerce) -> Self {
        let analytics = Arc::new(RecordingPublisher::default());
        let sessions = MemoryStore::default();
        let state = AppState::new(
            config,
            Arc::new(commerce),
            Arc::clone(&analytics) as Arc<dyn AnalyticsPublisher>,
        );

        Self {
            router: uncmfrt_storefront::app(state, sessions.clone()),
            analytics,
            sessions,
        }
    }

    /// Store a session holding `data` and return its cookie header value.
    ///
    /// # Panics
    ///
    /// Panics if the store rejects the record.
    pub async fn seed_session(&self, data: &[(&str, serde_json::Value)]) -> String {
        let mut record = Record {
            id: Id::default(),
            data: data
                .iter()
                .map(|(key, value)| ((*key).to_string(), value.clone()))
                .collect(),
            expiry_date: OffsetDateTime::now_utc() + CookieDuration::hours(1),
        };

        self.sessions
            .create(&mut record)
            .await
            .expect("session store accepts record");

        format!("{SESSION_COOKIE_NAME}={}", record.id)
    }

    /// Send a request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the router returns an error (it is infallible).
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// GET `uri`, optionally with a session cookie.
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).expect("valid request"))
            .await
    }
}

/// Read a response body as text.
///
/// # Panics
///
/// Panics if the body can't be read or isn't UTF-8.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
