//! GraphQL operations for the Shopify Storefront API.
//!
//! Each operation implements `graphql_client::GraphQLQuery` by hand: the
//! header only needs two small documents, so the variables and response
//! shapes are written out here instead of generated from the schema.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};
use uncmfrt_core::{CartId, CartSnapshot, Menu, ShopId};

use crate::shopify::{HeaderData, ShopInfo};

// =============================================================================
// Header
// =============================================================================

const HEADER_QUERY: &str = r"
fragment MenuItem on MenuItem {
  id
  resourceId
  tags
  title
  type
  url
}

query Header($headerMenuHandle: String!) {
  shop {
    id
    name
    primaryDomain {
      url
    }
  }
  menu(handle: $headerMenuHandle) {
    id
    items {
      ...MenuItem
      items {
        ...MenuItem
      }
    }
  }
}
";

/// Shop identity plus the header menu.
pub struct HeaderQuery;

pub mod header_query {
    use super::{Deserialize, Menu, Serialize, ShopId};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub header_menu_handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub shop: Shop,
        pub menu: Option<Menu>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Shop {
        pub id: ShopId,
        pub name: String,
        pub primary_domain: PrimaryDomain,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct PrimaryDomain {
        pub url: String,
    }
}

impl GraphQLQuery for HeaderQuery {
    type Variables = header_query::Variables;
    type ResponseData = header_query::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: HEADER_QUERY,
            operation_name: "Header",
        }
    }
}

impl From<header_query::ResponseData> for HeaderData {
    fn from(data: header_query::ResponseData) -> Self {
        Self {
            shop: ShopInfo {
                id: data.shop.id,
                name: data.shop.name,
                primary_domain_url: data.shop.primary_domain.url,
            },
            menu: data.menu,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

const CART_QUERY: &str = r"
query Cart($cartId: ID!) {
  cart(id: $cartId) {
    id
    totalQuantity
    checkoutUrl
  }
}
";

/// Cart badge data for a single cart.
pub struct CartQuery;

pub mod cart_query {
    use super::{CartId, CartSnapshot, Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: CartId,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub cart: Option<CartSnapshot>,
    }
}

impl GraphQLQuery for CartQuery {
    type Variables = cart_query::Variables;
    type ResponseData = cart_query::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: CART_QUERY,
            operation_name: "Cart",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_header_variables_are_camel_case() {
        let body = HeaderQuery::build_query(header_query::Variables {
            header_menu_handle: "main-menu".to_string(),
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["variables"]["headerMenuHandle"], "main-menu");
        assert_eq!(json["operationName"], "Header");
    }

    #[test]
    fn test_header_response_conversion() {
        let json = r#"{
            "shop": {
                "id": "gid://shopify/Shop/1",
                "name": "UNCMFRT",
                "primaryDomain": { "url": "https://uncmfrt.com" }
            },
            "menu": {
                "id": "gid://shopify/Menu/1",
                "items": [{
                    "id": "gid://shopify/MenuItem/1",
                    "resourceId": null,
                    "tags": [],
                    "title": "Shop",
                    "type": "HTTP",
                    "url": "https://uncmfrt.com/collections/all",
                    "items": []
                }]
            }
        }"#;
        let data: header_query::ResponseData = serde_json::from_str(json).unwrap();
        let header = HeaderData::from(data);
        assert_eq!(header.shop.primary_domain_url, "https://uncmfrt.com");
        assert_eq!(header.menu.unwrap().items.len(), 1);
    }

    #[test]
    fn test_header_response_without_menu() {
        let json = r#"{
            "shop": {
                "id": "gid://shopify/Shop/1",
                "name": "UNCMFRT",
                "primaryDomain": { "url": "https://uncmfrt.com" }
            },
            "menu": null
        }"#;
        let data: header_query::ResponseData = serde_json::from_str(json).unwrap();
        assert!(HeaderData::from(data).menu.is_none());
    }

    #[test]
    fn test_cart_response() {
        let json = r#"{"cart": {"id": "gid://shopify/Cart/c1", "totalQuantity": 4, "checkoutUrl": "https://uncmfrt.com/cart/c/c1"}}"#;
        let data: cart_query::ResponseData = serde_json::from_str(json).unwrap();
        assert_eq!(data.cart.unwrap().total_quantity, Some(4));

        let gone: cart_query::ResponseData = serde_json::from_str(r#"{"cart": null}"#).unwrap();
        assert!(gone.cart.is_none());
    }
}
