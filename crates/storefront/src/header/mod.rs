//! Site header: navigation menu, account link, cart badge and panel toggles.
//!
//! # Modules
//!
//! - [`links`] - Menu link normalization (internal URLs become paths)
//! - [`menu`] - Header menu assembly per viewport
//! - [`style`] - Active-link styling
//! - [`deferred`] - Render-cycle scoped deferred values
//! - [`projector`] - Account label and cart badge projections
//! - [`cart_toggle`] - Opening the cart panel and reporting `cart_viewed`
//! - [`cart_history`] - Session-scoped previous cart
//! - [`aside`] - Slide-over panel commands
//! - [`gender`] - Cosmetic men/women toggle

pub mod aside;
pub mod cart_history;
pub mod cart_toggle;
pub mod deferred;
pub mod gender;
pub mod links;
pub mod menu;
pub mod projector;
pub mod style;

use uncmfrt_core::{CartSnapshot, DeferredState, Menu};

use gender::GenderToggle;
use links::NormalizationContext;
use menu::{HeaderMenuView, Viewport, build_header_menu};
use projector::{AccountLabel, CartBadgeView, project_account_label, project_cart_badge};

/// Account link contents plus whether the browser should fetch it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSlot {
    pub label: AccountLabel,
    /// The login lookup had not settled when this was rendered.
    pub pending: bool,
}

impl AccountSlot {
    #[must_use]
    pub const fn from_state(state: &DeferredState<bool>) -> Self {
        Self {
            label: project_account_label(state),
            pending: state.is_pending(),
        }
    }

    /// Final rendering; the browser won't ask again.
    #[must_use]
    pub const fn settled(state: &DeferredState<bool>) -> Self {
        Self {
            label: project_account_label(state),
            pending: false,
        }
    }
}

/// Cart badge contents plus whether the browser should fetch it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSlot {
    pub badge: CartBadgeView,
    /// The cart lookup had not resolved when this was rendered. A failed
    /// lookup counts as pending so the badge gets another chance.
    pub pending: bool,
}

impl CartSlot {
    #[must_use]
    pub fn from_state(state: &DeferredState<Option<CartSnapshot>>) -> Self {
        Self {
            badge: project_cart_badge(state),
            pending: !matches!(state, DeferredState::Resolved(_)),
        }
    }

    /// Final rendering; the browser won't ask again.
    #[must_use]
    pub fn settled(state: &DeferredState<Option<CartSnapshot>>) -> Self {
        Self {
            badge: project_cart_badge(state),
            pending: false,
        }
    }
}

/// Everything the header template renders.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub shop_name: String,
    pub desktop_menu: HeaderMenuView,
    pub mobile_menu: HeaderMenuView,
    pub account: AccountSlot,
    pub cart: CartSlot,
    pub gender: GenderToggle,
}

impl HeaderView {
    /// Assemble the header from the menu and the observed deferred states.
    #[must_use]
    pub fn new(
        shop_name: String,
        menu: Option<&Menu>,
        ctx: &NormalizationContext,
        current_path: &str,
        login: &DeferredState<bool>,
        cart: &DeferredState<Option<CartSnapshot>>,
    ) -> Self {
        Self {
            shop_name,
            desktop_menu: build_header_menu(menu, ctx, Viewport::Desktop, current_path),
            mobile_menu: build_header_menu(menu, ctx, Viewport::Mobile, current_path),
            account: AccountSlot::from_state(login),
            cart: CartSlot::from_state(cart),
            gender: GenderToggle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_with_unsettled_lookups() {
        let ctx = NormalizationContext::new("uncmfrt.com", "https://uncmfrt.com");
        let header = HeaderView::new(
            "UNCMFRT".to_string(),
            None,
            &ctx,
            "/",
            &DeferredState::Pending,
            &DeferredState::Failed,
        );

        assert_eq!(header.account.label, AccountLabel::SignIn);
        assert!(header.account.pending);
        assert_eq!(header.cart.badge.count, None);
        assert!(header.cart.pending);
        assert_eq!(header.desktop_menu.links.len(), 4);
        assert_eq!(header.mobile_menu.links.len(), 5);
    }

    #[test]
    fn test_header_with_settled_lookups() {
        let ctx = NormalizationContext::new("uncmfrt.com", "https://uncmfrt.com");
        let cart = Some(CartSnapshot {
            total_quantity: Some(5),
            ..CartSnapshot::default()
        });
        let header = HeaderView::new(
            "UNCMFRT".to_string(),
            None,
            &ctx,
            "/",
            &DeferredState::Resolved(true),
            &DeferredState::Resolved(cart),
        );

        assert_eq!(header.account.label, AccountLabel::Account);
        assert!(!header.account.pending);
        assert_eq!(header.cart.badge.count, Some(5));
        assert!(!header.cart.pending);
    }

    #[test]
    fn test_failed_login_is_settled() {
        let slot = AccountSlot::from_state(&DeferredState::Failed);
        assert_eq!(slot.label, AccountLabel::SignIn);
        assert!(!slot.pending);
    }

    #[test]
    fn test_settled_slots_never_poll() {
        assert!(!AccountSlot::settled(&DeferredState::Pending).pending);
        assert!(!CartSlot::settled(&DeferredState::Failed).pending);
    }
}
