//! Previous-cart tracking for analytics.
//!
//! The `cart_viewed` event reports the cart before and after the latest
//! change. The history lives in the visitor's session and is owned by the
//! route layer; the header only reads it.

use serde::{Deserialize, Serialize};
use uncmfrt_core::CartSnapshot;

/// Session key for the stored [`CartHistory`].
pub const SESSION_KEY: &str = "cart_history";

/// The last two distinct cart snapshots seen by this session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartHistory {
    pub current: Option<CartSnapshot>,
    pub previous: Option<CartSnapshot>,
}

impl CartHistory {
    /// Record a resolved cart. Returns whether the history changed.
    ///
    /// A snapshot equal to `current` is ignored so re-rendering the same
    /// cart doesn't erase the previous one.
    pub fn observe(&mut self, snapshot: Option<CartSnapshot>) -> bool {
        if self.current == snapshot {
            return false;
        }
        self.previous = std::mem::replace(&mut self.current, snapshot);
        true
    }
}
