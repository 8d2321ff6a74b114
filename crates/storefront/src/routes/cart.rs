//! Cart route handlers.
//!
//! The header's cart link points at `/cart` so it works without
//! JavaScript. With htmx it posts to `/cart/open` instead, which opens the
//! cart panel in place and reports `cart_viewed`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::{HeaderMap, HeaderName},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;
use uncmfrt_core::CartSnapshot;

use super::aside::aside_response;
use super::header::{load_cart_history, render_header_with_cart, settle_cart, shop_id};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::header::HeaderView;
use crate::header::aside::HxAside;
use crate::header::cart_toggle::{
    ActivationEvent, ActivationSource, CartToggleError, OpenCart, on_open_cart,
};
use crate::state::AppState;

/// Set by htmx on every request it issues.
const HX_REQUEST: HeaderName = HeaderName::from_static("hx-request");

/// Browser URL at the time htmx issued the request.
const HX_CURRENT_URL: HeaderName = HeaderName::from_static("hx-current-url");

/// Cart display data for templates.
#[derive(Debug, Clone, Default)]
pub struct CartView {
    pub item_count: u32,
    pub checkout_url: Option<String>,
}

impl From<&CartSnapshot> for CartView {
    fn from(cart: &CartSnapshot) -> Self {
        Self {
            item_count: cart.quantity_or_zero(),
            checkout_url: cart.checkout_url.clone(),
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub header: HeaderView,
    /// `None` when the cart couldn't be loaded.
    pub cart: Option<CartView>,
}

/// Display the cart page.
///
/// GET /cart
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = settle_cart(&state, &session).await;
    let view = cart
        .resolved()
        .map(|cart| cart.as_ref().map(CartView::from).unwrap_or_default());
    let header = render_header_with_cart(&state, &session, "/cart", cart).await;

    CartShowTemplate { header, cart: view }
}

/// Who activated the cart link.
///
/// Only htmx posts here on a click; anything else is not a visitor opening
/// the panel.
fn activation_source(headers: &HeaderMap) -> ActivationSource {
    let from_htmx = headers
        .get(HX_REQUEST)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true");

    if from_htmx {
        ActivationSource::Pointer
    } else {
        ActivationSource::Synthetic
    }
}

/// Open the cart panel.
///
/// POST /cart/open
///
/// Reports the cart the session currently holds, which may lag behind a
/// cart lookup still running for the page.
#[instrument(skip(state, session, headers))]
pub async fn open(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    let mut event = ActivationEvent::new(activation_source(&headers));
    let history = load_cart_history(&session).await?;
    let shop = state.shop_analytics(shop_id(&state).await);
    let url = headers
        .get(HX_CURRENT_URL)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let mut aside = HxAside::new();
    let opened = on_open_cart(
        &mut event,
        &mut aside,
        state.analytics(),
        OpenCart {
            cart: history.current.as_ref(),
            prev_cart: history.previous.as_ref(),
            shop: &shop,
            url,
        },
    );

    match opened {
        Ok(()) => {
            add_breadcrumb("cart", "Opened cart panel", Some(&[("url", url)]));
            Ok(aside_response(&aside))
        }
        Err(CartToggleError::NotUserInitiated) => Ok(Redirect::to("/cart").into_response()),
    }
}
