//! UNCMFRT storefront library.
//!
//! Renders the site header (navigation menu, account link, cart badge and
//! slide-over panels) on top of the Shopify Storefront API. The router is
//! built here so integration tests can drive it without a listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod header;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;

use axum::{Router, extract::Request, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::SessionStore;

use state::AppState;

/// Static assets directory, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are added by the binary, outside this stack.
pub fn app<Store>(state: AppState, session_store: Store) -> Router
where
    Store: SessionStore + Clone,
{
    let session_layer = middleware::create_session_layer(session_store, state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(not_found)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Shopify.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: axum::http::Uri) -> error::AppError {
    error::AppError::NotFound(uri.path().to_owned())
}
