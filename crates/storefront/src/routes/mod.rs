//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Cart
//! GET  /cart                   - Cart page (no-JS fallback for the cart link)
//! POST /cart/open              - Open the cart panel, report cart_viewed (HTMX)
//!
//! # Header fragments (HTMX)
//! GET  /header/account         - Settled account link
//! GET  /header/cart-badge      - Settled cart badge
//! POST /header/gender          - Flip the gender toggle
//!
//! # Panels (HTMX)
//! POST /aside/{key}/open       - Open the mobile, search or cart panel
//! POST /aside/close            - Close the open panel
//! ```

pub mod aside;
pub mod cart;
pub mod header;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/open", post(cart::open))
}

/// Create the header fragment routes router.
pub fn header_routes() -> Router<AppState> {
    Router::new()
        .route("/account", get(header::account))
        .route("/cart-badge", get(header::cart_badge))
        .route("/gender", post(header::toggle_gender))
}

/// Create the panel routes router.
pub fn aside_routes() -> Router<AppState> {
    Router::new()
        .route("/{key}/open", post(aside::open))
        .route("/close", post(aside::close))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .nest("/header", header_routes())
        .nest("/aside", aside_routes())
}
