//! Cart snapshot shown in the header.

use serde::{Deserialize, Serialize};

use super::id::CartId;

/// The slice of a Shopify cart the header needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub id: Option<CartId>,
    /// Total item count. `None` means empty or unknown.
    pub total_quantity: Option<u32>,
    pub checkout_url: Option<String>,
}

impl CartSnapshot {
    /// Item count with "unknown" collapsed to zero.
    #[must_use]
    pub fn quantity_or_zero(&self) -> u32 {
        self.total_quantity.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_or_zero() {
        let cart = CartSnapshot {
            total_quantity: Some(3),
            ..CartSnapshot::default()
        };
        assert_eq!(cart.quantity_or_zero(), 3);
        assert_eq!(CartSnapshot::default().quantity_or_zero(), 0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let cart = CartSnapshot {
            id: Some(CartId::new("gid://shopify/Cart/1")),
            total_quantity: Some(2),
            checkout_url: None,
        };
        let json = serde_json::to_value(&cart).unwrap_or_default();
        assert_eq!(json["totalQuantity"], 2);
        assert_eq!(json["id"], "gid://shopify/Cart/1");
    }
}
