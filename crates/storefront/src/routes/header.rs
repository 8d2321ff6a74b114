//! Header rendering shared by every page, and its htmx fragments.
//!
//! A page render opens a [`RenderCycle`], starts the login and cart lookups
//! and waits at most `HEADER_DEFER_BUDGET_MS` for them. Whatever has not
//! settled by then renders its fallback with an `hx-get` back to the
//! fragment routes below, which finish the lookup in a request of its own.

use std::sync::Arc;
use std::time::Duration;

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;
use uncmfrt_core::{CartId, CartSnapshot, DeferredState, ShopId};

use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::header::cart_history::{self, CartHistory};
use crate::header::deferred::{Deferred, RenderCycle};
use crate::header::gender::GenderToggle;
use crate::header::{AccountSlot, CartSlot, HeaderView};
use crate::services::customer;
use crate::shopify::{CommerceApi, HeaderData, ShopInfo};
use crate::state::AppState;

/// Session key for the visitor's Shopify cart id.
pub const CART_ID_KEY: &str = "cart_id";

/// Shop name shown when the Storefront API can't be reached.
pub const FALLBACK_SHOP_NAME: &str = "UNCMFRT.COM";

/// How long a fragment request waits for its lookup before giving up.
const FRAGMENT_SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// Lookups
// =============================================================================

/// Shop and menu, or a fallback so the header never renders empty.
async fn load_header_data(state: &AppState) -> HeaderData {
    let handle = &state.config().header.menu_handle;
    match state.commerce().header(handle).await {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(
                menu_handle = %handle,
                error = %e,
                "Failed to load header data, using fallback menu"
            );
            fallback_header_data(state.config())
        }
    }
}

fn fallback_header_data(config: &StorefrontConfig) -> HeaderData {
    HeaderData {
        shop: ShopInfo {
            id: ShopId::new(""),
            name: FALLBACK_SHOP_NAME.to_string(),
            primary_domain_url: config.base_url.clone(),
        },
        menu: None,
    }
}

/// Shop id for analytics events.
pub(crate) async fn shop_id(state: &AppState) -> ShopId {
    load_header_data(state).await.shop.id
}

async fn load_cart(
    commerce: &dyn CommerceApi,
    session: &Session,
) -> Result<Option<CartSnapshot>> {
    let Some(cart_id) = session.get::<CartId>(CART_ID_KEY).await? else {
        return Ok(None);
    };
    Ok(commerce.cart(&cart_id).await?)
}

fn defer_login(cycle: &mut RenderCycle, session: &Session) -> Deferred<bool> {
    let session = session.clone();
    cycle.defer("is_logged_in", async move { customer::is_logged_in(&session).await })
}

fn defer_cart(
    cycle: &mut RenderCycle,
    state: &AppState,
    session: &Session,
) -> Deferred<Option<CartSnapshot>> {
    let commerce = Arc::clone(state.commerce());
    let session = session.clone();
    cycle.defer("cart", async move { load_cart(commerce.as_ref(), &session).await })
}

/// Remember a resolved cart so `cart_viewed` can report the previous one.
async fn record_cart(session: &Session, cart: &DeferredState<Option<CartSnapshot>>) {
    let Some(cart) = cart.resolved() else {
        return;
    };

    if let Err(e) = update_cart_history(session, cart.clone()).await {
        tracing::warn!(error = %e, "Failed to record cart history");
    }
}

async fn update_cart_history(session: &Session, cart: Option<CartSnapshot>) -> Result<()> {
    let mut history = load_cart_history(session).await?;
    if history.observe(cart) {
        session.insert(cart_history::SESSION_KEY, &history).await?;
    }
    Ok(())
}

/// Stored cart history for the session.
pub(crate) async fn load_cart_history(session: &Session) -> Result<CartHistory> {
    Ok(session
        .get(cart_history::SESSION_KEY)
        .await?
        .unwrap_or_default())
}

// =============================================================================
// Page Header
// =============================================================================

/// Build the header for a page at `current_path`.
///
/// Never fails: unreachable commerce data falls back to the static menu and
/// unsettled lookups render as pending.
pub async fn render_header(state: &AppState, session: &Session, current_path: &str) -> HeaderView {
    assemble_header(state, session, current_path, None).await
}

/// Build the header for a page that already resolved the cart.
pub async fn render_header_with_cart(
    state: &AppState,
    session: &Session,
    current_path: &str,
    cart: DeferredState<Option<CartSnapshot>>,
) -> HeaderView {
    assemble_header(state, session, current_path, Some(cart)).await
}

#[instrument(skip(state, session, known_cart))]
async fn assemble_header(
    state: &AppState,
    session: &Session,
    current_path: &str,
    known_cart: Option<DeferredState<Option<CartSnapshot>>>,
) -> HeaderView {
    let mut cycle = RenderCycle::new();
    let mut login = defer_login(&mut cycle, session);
    let mut cart = match known_cart {
        Some(cart) => Deferred::ready(cart),
        None => defer_cart(&mut cycle, state, session),
    };

    let data = load_header_data(state).await;

    let budget = state.config().header.defer_budget;
    let (login, cart) = tokio::join!(login.settle_within(budget), cart.settle_within(budget));
    cycle.teardown();

    record_cart(session, &cart).await;

    let ctx = state.normalization_context(&data.shop.primary_domain_url);
    HeaderView::new(
        data.shop.name,
        data.menu.as_ref(),
        &ctx,
        current_path,
        &login,
        &cart,
    )
}

/// Resolve the cart for a page that needs it in full.
pub(crate) async fn settle_cart(
    state: &AppState,
    session: &Session,
) -> DeferredState<Option<CartSnapshot>> {
    let mut cycle = RenderCycle::new();
    let mut cart = defer_cart(&mut cycle, state, session);
    let cart = cart.settle_within(FRAGMENT_SETTLE_TIMEOUT).await;
    cycle.teardown();

    record_cart(session, &cart).await;
    cart
}

// =============================================================================
// Fragments
// =============================================================================

/// Account link fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/account_label.html")]
pub struct AccountLabelTemplate {
    pub account: AccountSlot,
}

/// Cart badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_badge.html")]
pub struct CartBadgeTemplate {
    pub cart: CartSlot,
}

/// Gender toggle fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/gender_toggle.html")]
pub struct GenderToggleTemplate {
    pub gender: GenderToggle,
}

/// Settled account link.
///
/// GET /header/account
#[instrument(skip(session))]
pub async fn account(session: Session) -> impl IntoResponse {
    let mut cycle = RenderCycle::new();
    let mut login = defer_login(&mut cycle, &session);
    let login = login.settle_within(FRAGMENT_SETTLE_TIMEOUT).await;
    cycle.teardown();

    AccountLabelTemplate {
        account: AccountSlot::settled(&login),
    }
}

/// Settled cart badge.
///
/// GET /header/cart-badge
#[instrument(skip(state, session))]
pub async fn cart_badge(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = settle_cart(&state, &session).await;

    CartBadgeTemplate {
        cart: CartSlot::settled(&cart),
    }
}

/// Flip the gender toggle.
///
/// POST /header/gender
pub async fn toggle_gender(Form(current): Form<GenderToggle>) -> impl IntoResponse {
    GenderToggleTemplate {
        gender: current.toggle(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_cart_badge_fragment_reloads() {
        let html = CartBadgeTemplate {
            cart: CartSlot::from_state(&DeferredState::Pending),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"id="cart-badge""#));
        assert!(html.contains(r#"hx-get="/header/cart-badge""#));
    }

    #[test]
    fn test_settled_cart_badge_fragment_shows_count() {
        let cart = DeferredState::Resolved(Some(CartSnapshot {
            total_quantity: Some(2),
            ..CartSnapshot::default()
        }));
        let html = CartBadgeTemplate {
            cart: CartSlot::settled(&cart),
        }
        .render()
        .unwrap();

        assert!(html.contains(">2</span>"));
        assert!(!html.contains("hx-get"));
    }

    #[test]
    fn test_account_fragment_renders_label() {
        let html = AccountLabelTemplate {
            account: AccountSlot::settled(&DeferredState::Resolved(true)),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"href="/account""#));
        assert!(html.contains(">Account</a>"));
    }

    #[test]
    fn test_gender_toggle_fragment_carries_state() {
        let html = GenderToggleTemplate {
            gender: GenderToggle::default().toggle(),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"id="gender-toggle""#));
        assert!(html.contains("hx-vals="));
    }
}
