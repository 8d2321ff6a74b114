//! Menu link normalization.
//!
//! Menu URLs coming from Shopify are absolute. Links that point at the store
//! itself are rewritten to path-only form so navigation stays on the
//! storefront; links to other sites pass through untouched.

use thiserror::Error;
use uncmfrt_core::MenuItem;
use url::Url;

/// Marker present in every URL on Shopify's own hosting domain.
pub const SHOPIFY_PLATFORM_MARKER: &str = "myshopify.com";

/// Errors raised while normalizing a menu link.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The item has no URL and is not navigable.
    #[error("menu item has no url")]
    MissingUrl,

    /// A URL classified as internal is not a valid absolute URL.
    #[error("malformed internal url {url:?}: {source}")]
    MalformedInternalUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Domains that identify a link as internal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationContext {
    /// Customer-facing hostname (e.g., `uncmfrt.com`).
    pub public_store_domain: String,
    /// Canonical absolute URL of the store (e.g., `https://uncmfrt.com`).
    pub primary_domain_url: String,
    /// Marker for the commerce platform's hosting domain.
    pub platform_marker: &'static str,
}

impl NormalizationContext {
    #[must_use]
    pub fn new(public_store_domain: impl Into<String>, primary_domain_url: impl Into<String>) -> Self {
        Self {
            public_store_domain: public_store_domain.into(),
            primary_domain_url: primary_domain_url.into(),
            platform_marker: SHOPIFY_PLATFORM_MARKER,
        }
    }

    fn needles(&self) -> impl Iterator<Item = &str> {
        [
            self.platform_marker,
            self.public_store_domain.as_str(),
            self.primary_domain_url.as_str(),
        ]
        .into_iter()
    }
}

/// Where a menu link navigates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    /// Path on this storefront.
    Internal(String),
    /// URL on another site, unchanged.
    External(String),
}

impl NavTarget {
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            Self::Internal(href) | Self::External(href) => href,
        }
    }

    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

/// Whether `url` points at the store's own domain or platform.
#[must_use]
pub fn is_internal(url: &str, ctx: &NormalizationContext) -> bool {
    ctx.needles().any(|needle| url.contains(needle))
}

/// Rewrite an internal URL to its path; leave external URLs alone.
///
/// Only the path of an internal URL survives: scheme, host, port, query
/// string and fragment are dropped.
///
/// # Errors
///
/// Returns [`LinkError::MissingUrl`] if the item has no URL and
/// [`LinkError::MalformedInternalUrl`] if an internal URL is not absolute.
pub fn normalize(item: &MenuItem, ctx: &NormalizationContext) -> Result<NavTarget, LinkError> {
    let url = item.url.as_deref().ok_or(LinkError::MissingUrl)?;
    normalize_url(url, ctx)
}

/// [`normalize`] for a bare URL string.
///
/// # Errors
///
/// Returns [`LinkError::MalformedInternalUrl`] if an internal URL is not
/// absolute.
pub fn normalize_url(url: &str, ctx: &NormalizationContext) -> Result<NavTarget, LinkError> {
    if !is_internal(url, ctx) {
        return Ok(NavTarget::External(url.to_owned()));
    }

    let parsed = Url::parse(url).map_err(|source| LinkError::MalformedInternalUrl {
        url: url.to_owned(),
        source,
    })?;
    Ok(NavTarget::Internal(parsed.path().to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uncmfrt_core::{MenuItemId, MenuItemType};

    fn ctx() -> NormalizationContext {
        NormalizationContext::new("uncmfrt.com", "https://www.uncmfrt.com")
    }

    fn item(url: Option<&str>) -> MenuItem {
        MenuItem {
            id: MenuItemId::new("gid://shopify/MenuItem/1"),
            url: url.map(str::to_owned),
            title: "Shop".to_string(),
            resource_id: None,
            tags: Vec::new(),
            item_type: MenuItemType::Http,
            items: Vec::new(),
        }
    }

    #[test]
    fn test_platform_domain_is_stripped() {
        let target = normalize(&item(Some("https://admin.myshopify.com/foo/bar")), &ctx()).unwrap();
        assert_eq!(target, NavTarget::Internal("/foo/bar".to_string()));
    }

    #[test]
    fn test_external_url_is_unchanged() {
        let target = normalize(&item(Some("https://othersite.example/page")), &ctx()).unwrap();
        assert_eq!(target.href(), "https://othersite.example/page");
        assert!(!target.is_internal());
    }

    #[test]
    fn test_public_store_domain_is_stripped() {
        let target = normalize(&item(Some("https://uncmfrt.com/collections/all")), &ctx()).unwrap();
        assert_eq!(target.href(), "/collections/all");
    }

    #[test]
    fn test_primary_domain_url_is_stripped() {
        let ctx = NormalizationContext::new("shop.internal", "https://www.uncmfrt.com");
        let target = normalize(&item(Some("https://www.uncmfrt.com/pages/science")), &ctx).unwrap();
        assert_eq!(target.href(), "/pages/science");
    }

    #[test]
    fn test_query_and_fragment_are_dropped() {
        let target = normalize(
            &item(Some("https://uncmfrt.com/search?q=pillow#results")),
            &ctx(),
        )
        .unwrap();
        assert_eq!(target.href(), "/search");
    }

    #[test]
    fn test_host_only_url_becomes_root() {
        let target = normalize(&item(Some("https://uncmfrt.com")), &ctx()).unwrap();
        assert_eq!(target.href(), "/");
    }

    #[test]
    fn test_relative_url_is_external() {
        let target = normalize(&item(Some("/blogs/journal")), &ctx()).unwrap();
        assert_eq!(target, NavTarget::External("/blogs/journal".to_string()));
    }

    #[test]
    fn test_relative_internal_url_is_malformed() {
        let err = normalize(&item(Some("/redirect/uncmfrt.com/x")), &ctx()).unwrap_err();
        assert!(matches!(err, LinkError::MalformedInternalUrl { url, .. } if url == "/redirect/uncmfrt.com/x"));
    }

    #[test]
    fn test_missing_url() {
        assert!(matches!(normalize(&item(None), &ctx()), Err(LinkError::MissingUrl)));
    }

    #[test]
    fn test_title_and_id_are_ignored() {
        let mut a = item(Some("https://uncmfrt.com/pages/about"));
        let mut b = a.clone();
        a.title = "uncmfrt.com".to_string();
        b.title = "About".to_string();
        b.id = MenuItemId::new("gid://shopify/MenuItem/myshopify.com");
        assert_eq!(normalize(&a, &ctx()).unwrap(), normalize(&b, &ctx()).unwrap());
    }

    #[test]
    fn test_empty_store_domain_matches_everything() {
        // Plain substring test: "" is contained in every URL.
        let ctx = NormalizationContext::new("", "https://uncmfrt.com");
        assert!(is_internal("https://othersite.example/page", &ctx));
        assert_eq!(
            normalize_url("https://othersite.example/page", &ctx).unwrap(),
            NavTarget::Internal("/page".to_string())
        );
    }

    #[test]
    fn test_is_internal_examples() {
        let ctx = ctx();
        assert!(is_internal("https://uncmfrt.myshopify.com/products/x", &ctx));
        assert!(is_internal("https://uncmfrt.com/", &ctx));
        assert!(!is_internal("https://instagram.com/uncmfrt", &ctx));
    }
}
