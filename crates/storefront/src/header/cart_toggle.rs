//! The header's cart affordance.
//!
//! Activating the cart link opens the cart panel in place instead of
//! navigating to `/cart`, and reports a `cart_viewed` analytics event.

use thiserror::Error;
use uncmfrt_core::CartSnapshot;

use super::aside::{AsideKey, PanelManager};
use crate::services::analytics::{
    AnalyticsPayload, AnalyticsPublisher, CART_VIEWED, CartViewPayload, ShopAnalytics,
};

/// How the cart link was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationSource {
    /// Click or tap.
    Pointer,
    /// Enter/space on the focused link.
    Keyboard,
    /// Anything not caused by the visitor (prefetch, crawler, script).
    Synthetic,
}

/// An activation of the cart link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationEvent {
    pub source: ActivationSource,
    default_prevented: bool,
}

impl ActivationEvent {
    #[must_use]
    pub const fn new(source: ActivationSource) -> Self {
        Self {
            source,
            default_prevented: false,
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self.source,
            ActivationSource::Pointer | ActivationSource::Keyboard
        )
    }

    /// Cancel the link's default navigation.
    pub const fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartToggleError {
    #[error("cart toggle activated without user interaction")]
    NotUserInitiated,
}

/// Data reported with `cart_viewed`.
#[derive(Debug, Clone, Copy)]
pub struct OpenCart<'a> {
    /// Cart currently held by the page. May still be unresolved (`None`).
    pub cart: Option<&'a CartSnapshot>,
    pub prev_cart: Option<&'a CartSnapshot>,
    pub shop: &'a ShopAnalytics,
    /// Page the cart was opened from.
    pub url: &'a str,
}

/// Handle an activation of the cart link.
///
/// In order: cancels the default navigation, opens the cart panel, and
/// publishes exactly one `cart_viewed` event. The event carries whatever
/// cart the page holds at click time, even if its lookup has not settled.
///
/// # Errors
///
/// Returns [`CartToggleError::NotUserInitiated`] for synthetic activations;
/// nothing happens in that case.
pub fn on_open_cart(
    event: &mut ActivationEvent,
    panels: &mut dyn PanelManager,
    analytics: &dyn AnalyticsPublisher,
    view: OpenCart<'_>,
) -> Result<(), CartToggleError> {
    if !event.is_user_initiated() {
        return Err(CartToggleError::NotUserInitiated);
    }

    event.prevent_default();
    panels.open(AsideKey::Cart);
    analytics.publish(
        CART_VIEWED,
        AnalyticsPayload::CartViewed(CartViewPayload {
            cart: view.cart.cloned(),
            prev_cart: view.prev_cart.cloned(),
            shop: view.shop.clone(),
            url: view.url.to_owned(),
        }),
    );

    Ok(())
}
