//! Navigation menu types as returned by the Shopify Storefront API.

use serde::{Deserialize, Serialize};

use super::id::{MenuId, MenuItemId};

/// Kind of resource a menu item links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuItemType {
    Article,
    Blog,
    Catalog,
    Collection,
    Collections,
    CustomerAccountPage,
    Frontpage,
    Http,
    Metaobject,
    Page,
    Product,
    Search,
    ShopPolicy,
    /// A type added to the API after this crate was written.
    #[serde(other)]
    Other,
}

/// A single entry in a navigation menu.
///
/// Items are supplied wholesale per page render and never mutated locally.
/// An item without a URL is never rendered as a navigable link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    /// Absolute or relative URL.
    pub url: Option<String>,
    /// Display text.
    pub title: String,
    /// GID of the linked resource (page, collection, ...), if any.
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub item_type: MenuItemType,
    /// Nested items (submenus).
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// A navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: MenuId,
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// The menu rendered when the store has no header menu configured.
    #[must_use]
    pub fn fallback() -> Self {
        fn item(
            id: &str,
            title: &str,
            item_type: MenuItemType,
            url: &str,
            resource_id: Option<&str>,
        ) -> MenuItem {
            MenuItem {
                id: MenuItemId::new(id),
                url: Some(url.to_owned()),
                title: title.to_owned(),
                resource_id: resource_id.map(str::to_owned),
                tags: Vec::new(),
                item_type,
                items: Vec::new(),
            }
        }

        Self {
            id: MenuId::new("gid://shopify/Menu/199655587896"),
            items: vec![
                item(
                    "gid://shopify/MenuItem/461609500728",
                    "Collections",
                    MenuItemType::Http,
                    "/collections",
                    None,
                ),
                item(
                    "gid://shopify/MenuItem/461609533496",
                    "Blog",
                    MenuItemType::Http,
                    "/blogs/journal",
                    None,
                ),
                item(
                    "gid://shopify/MenuItem/461609566264",
                    "Policies",
                    MenuItemType::Http,
                    "/policies",
                    None,
                ),
                item(
                    "gid://shopify/MenuItem/461609599032",
                    "About",
                    MenuItemType::Page,
                    "/pages/about",
                    Some("gid://shopify/Page/92591030328"),
                ),
            ],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_menu_ids() {
        let menu = Menu::fallback();
        let ids: Vec<&str> = menu.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "gid://shopify/MenuItem/461609500728",
                "gid://shopify/MenuItem/461609533496",
                "gid://shopify/MenuItem/461609566264",
                "gid://shopify/MenuItem/461609599032",
            ]
        );
    }

    #[test]
    fn test_fallback_menu_content() {
        let menu = Menu::fallback();
        assert_eq!(menu.id.as_str(), "gid://shopify/Menu/199655587896");

        let about = &menu.items[3];
        assert_eq!(about.title, "About");
        assert_eq!(about.url.as_deref(), Some("/pages/about"));
        assert_eq!(about.item_type, MenuItemType::Page);
        assert_eq!(
            about.resource_id.as_deref(),
            Some("gid://shopify/Page/92591030328")
        );

        assert!(menu.items.iter().all(|i| i.tags.is_empty() && i.items.is_empty()));
        assert!(menu.items[..3].iter().all(|i| i.item_type == MenuItemType::Http));
    }

    #[test]
    fn test_deserialize_storefront_shape() {
        let json = r#"{
            "id": "gid://shopify/MenuItem/1",
            "resourceId": null,
            "tags": [],
            "title": "Shop",
            "type": "COLLECTION",
            "url": "https://uncmfrt.myshopify.com/collections/all",
            "items": []
        }"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, MenuItemType::Collection);
        assert_eq!(item.title, "Shop");
    }

    #[test]
    fn test_unknown_item_type() {
        let json = r#"{"id": "gid://shopify/MenuItem/2", "title": "X", "type": "HOLOGRAM", "url": null}"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, MenuItemType::Other);
        assert!(item.url.is_none());
        assert!(item.items.is_empty());
    }
}
