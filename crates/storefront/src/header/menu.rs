//! Header menu assembly.

use std::borrow::Cow;

use uncmfrt_core::Menu;

use super::links::{LinkError, NormalizationContext, normalize};
use super::style::{NavLinkState, active_link_style};

/// Which copy of the menu is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    Desktop,
    Mobile,
}

impl Viewport {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }
}

/// A rendered menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkView {
    /// Menu item GID, empty for the synthetic Home link.
    pub key: String,
    pub title: String,
    /// `None` renders the entry as plain text.
    pub href: Option<String>,
    pub is_active: bool,
    pub class_names: &'static str,
}

/// A rendered header menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMenuView {
    pub viewport: Viewport,
    /// `header-menu-desktop` or `header-menu-mobile`.
    pub class_name: String,
    pub links: Vec<NavLinkView>,
}

fn link(key: String, title: String, href: String, current_path: &str) -> NavLinkView {
    // Links match exactly; `/collections` is not active on `/collections/all`.
    let is_active = href == current_path;
    let style = active_link_style(NavLinkState {
        is_active,
        is_pending: false,
    });
    NavLinkView {
        key,
        title,
        href: Some(href),
        is_active,
        class_names: style.class_names(),
    }
}

/// Build the header menu for one viewport.
///
/// Uses [`Menu::fallback`] when the store has no menu. Items without a URL
/// are skipped. An item whose internal URL cannot be parsed is logged and
/// rendered as plain text so one bad link never takes the header down.
#[must_use]
pub fn build_header_menu(
    menu: Option<&Menu>,
    ctx: &NormalizationContext,
    viewport: Viewport,
    current_path: &str,
) -> HeaderMenuView {
    let menu = menu.map_or_else(|| Cow::Owned(Menu::fallback()), Cow::Borrowed);

    let mut links = Vec::with_capacity(menu.items.len() + 1);

    if viewport == Viewport::Mobile {
        links.push(link(
            "home".to_string(),
            "Home".to_string(),
            "/".to_string(),
            current_path,
        ));
    }

    for item in menu.items.iter().filter(|item| item.url.is_some()) {
        match normalize(item, ctx) {
            Ok(target) => links.push(link(
                item.id.to_string(),
                item.title.clone(),
                target.href().to_owned(),
                current_path,
            )),
            Err(err @ LinkError::MalformedInternalUrl { .. }) => {
                tracing::error!(
                    menu_id = %menu.id,
                    item_id = %item.id,
                    error = %err,
                    "Malformed internal menu link, rendering as plain text"
                );
                links.push(NavLinkView {
                    key: item.id.to_string(),
                    title: item.title.clone(),
                    href: None,
                    is_active: false,
                    class_names: active_link_style(NavLinkState::default()).class_names(),
                });
            }
            Err(LinkError::MissingUrl) => {}
        }
    }

    HeaderMenuView {
        viewport,
        class_name: format!("header-menu-{}", viewport.as_str()),
        links,
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use uncmfrt_core::{MenuId, MenuItem, MenuItemId, MenuItemType};

    fn ctx() -> NormalizationContext {
        NormalizationContext::new("uncmfrt.com", "https://uncmfrt.com")
    }

    fn item(n: u32, title: &str, url: Option<&str>) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(format!("gid://shopify/MenuItem/{n}")),
            url: url.map(str::to_owned),
            title: title.to_string(),
            resource_id: None,
            tags: Vec::new(),
            item_type: MenuItemType::Http,
            items: Vec::new(),
        }
    }

    fn menu(items: Vec<MenuItem>) -> Menu {
        Menu {
            id: MenuId::new("gid://shopify/Menu/1"),
            items,
        }
    }

    #[test]
    fn test_missing_menu_uses_fallback() {
        let view = build_header_menu(None, &ctx(), Viewport::Desktop, "/");
        let titles: Vec<&str> = view.links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["Collections", "Blog", "Policies", "About"]);
        assert_eq!(view.links[0].key, "gid://shopify/MenuItem/461609500728");
        assert_eq!(view.class_name, "header-menu-desktop");
    }

    #[test]
    fn test_mobile_menu_starts_with_home() {
        let view = build_header_menu(None, &ctx(), Viewport::Mobile, "/");
        assert_eq!(view.class_name, "header-menu-mobile");
        assert_eq!(view.links.len(), 5);
        assert_eq!(view.links[0].title, "Home");
        assert_eq!(view.links[0].href.as_deref(), Some("/"));
        assert!(view.links[0].is_active);
    }

    #[test]
    fn test_items_without_url_are_skipped() {
        let menu = menu(vec![
            item(1, "Shop", Some("https://uncmfrt.com/collections/all")),
            item(2, "Coming soon", None),
        ]);
        let view = build_header_menu(Some(&menu), &ctx(), Viewport::Desktop, "/");
        assert_eq!(view.links.len(), 1);
        assert_eq!(view.links[0].href.as_deref(), Some("/collections/all"));
    }

    #[test]
    fn test_malformed_internal_link_is_not_navigable() {
        let menu = menu(vec![
            item(1, "Broken", Some("uncmfrt.com/no-scheme")),
            item(2, "Podcasts", Some("https://open.spotify.example/uncmfrt")),
        ]);
        let view = build_header_menu(Some(&menu), &ctx(), Viewport::Desktop, "/");
        assert_eq!(view.links.len(), 2);
        assert_eq!(view.links[0].title, "Broken");
        assert!(view.links[0].href.is_none());
        assert_eq!(
            view.links[1].href.as_deref(),
            Some("https://open.spotify.example/uncmfrt")
        );
    }

    #[test]
    fn test_active_link_matches_current_path() {
        let view = build_header_menu(None, &ctx(), Viewport::Desktop, "/blogs/journal");
        let active: Vec<&str> = view
            .links
            .iter()
            .filter(|l| l.is_active)
            .map(|l| l.title.as_str())
            .collect();
        assert_eq!(active, ["Blog"]);
        assert_eq!(view.links[1].class_names, "font-bold text-black");
        assert_eq!(view.links[0].class_names, "text-black");
    }
}
