//! Display projections of the header's deferred commerce state.
//!
//! Both projections are pure functions of a [`DeferredState`]. Pending and
//! failed lookups render the same safe fallback: a failed login lookup shows
//! "Sign in", a failed cart lookup shows a blank badge.

use std::fmt;

use uncmfrt_core::{CartSnapshot, DeferredState};

/// Text of the account call-to-action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountLabel {
    SignIn,
    Account,
}

impl AccountLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::Account => "Account",
        }
    }
}

impl fmt::Display for AccountLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project the login lookup onto the account label.
///
/// Only a resolved `true` shows "Account". This affects display only, never
/// authorization.
#[must_use]
pub const fn project_account_label(state: &DeferredState<bool>) -> AccountLabel {
    match state {
        DeferredState::Resolved(true) => AccountLabel::Account,
        DeferredState::Resolved(false) | DeferredState::Pending | DeferredState::Failed => {
            AccountLabel::SignIn
        }
    }
}

/// Cart badge contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartBadgeView {
    /// `None` renders a non-breaking blank that keeps the badge width.
    pub count: Option<u32>,
}

/// Project the cart lookup onto the badge.
#[must_use]
pub fn project_cart_badge(state: &DeferredState<Option<CartSnapshot>>) -> CartBadgeView {
    let count = match state {
        DeferredState::Resolved(cart) => Some(cart.as_ref().map_or(0, CartSnapshot::quantity_or_zero)),
        DeferredState::Pending | DeferredState::Failed => None,
    };
    CartBadgeView { count }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart(total_quantity: Option<u32>) -> Option<CartSnapshot> {
        Some(CartSnapshot {
            total_quantity,
            ..CartSnapshot::default()
        })
    }

    #[test]
    fn test_account_label_fallbacks() {
        assert_eq!(project_account_label(&DeferredState::Pending).as_str(), "Sign in");
        assert_eq!(project_account_label(&DeferredState::Failed).as_str(), "Sign in");
        assert_eq!(
            project_account_label(&DeferredState::Pending),
            project_account_label(&DeferredState::Failed)
        );
    }

    #[test]
    fn test_account_label_resolved() {
        assert_eq!(project_account_label(&DeferredState::Resolved(true)).as_str(), "Account");
        assert_eq!(project_account_label(&DeferredState::Resolved(false)).as_str(), "Sign in");
        assert_eq!(AccountLabel::Account.to_string(), "Account");
    }

    #[test]
    fn test_cart_badge_pending_is_blank() {
        assert_eq!(project_cart_badge(&DeferredState::Pending).count, None);
    }

    #[test]
    fn test_cart_badge_failed_matches_pending() {
        assert_eq!(
            project_cart_badge(&DeferredState::Failed),
            project_cart_badge(&DeferredState::Pending)
        );
    }

    #[test]
    fn test_cart_badge_resolved() {
        assert_eq!(project_cart_badge(&DeferredState::Resolved(None)).count, Some(0));
        assert_eq!(project_cart_badge(&DeferredState::Resolved(cart(Some(3)))).count, Some(3));
        assert_eq!(project_cart_badge(&DeferredState::Resolved(cart(None))).count, Some(0));
    }
}
