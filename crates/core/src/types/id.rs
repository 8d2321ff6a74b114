//! Newtype IDs for Shopify global identifiers.
//!
//! Shopify addresses every resource with a global ID of the form
//! `gid://shopify/<Kind>/<number>`. Use the `define_gid!` macro to create
//! type-safe wrappers that prevent accidentally mixing IDs from different
//! resource kinds.

/// Macro to define a type-safe Shopify global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Accessors: `new()`, `as_str()`, `numeric_part()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use uncmfrt_core::define_gid;
/// define_gid!(ProductId);
/// define_gid!(VariantId);
///
/// let product = ProductId::new("gid://shopify/Product/1");
/// assert_eq!(product.numeric_part(), "1");
///
/// // These are different types, so this won't compile:
/// // let _: VariantId = product;
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a global ID string.
            #[must_use]
            pub fn new(gid: impl Into<String>) -> Self {
                Self(gid.into())
            }

            /// Get the underlying global ID string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Trailing segment of the global ID (the numeric resource ID).
            ///
            /// Returns the whole string if it has no `/` separators.
            #[must_use]
            pub fn numeric_part(&self) -> &str {
                self.0.rsplit('/').next().unwrap_or(&self.0)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(gid: String) -> Self {
                Self(gid)
            }
        }

        impl From<&str> for $name {
            fn from(gid: &str) -> Self {
                Self(gid.to_owned())
            }
        }
    };
}

define_gid!(MenuId);
define_gid!(MenuItemId);
define_gid!(ShopId);
define_gid!(CartId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_part() {
        let id = MenuItemId::new("gid://shopify/MenuItem/461609500728");
        assert_eq!(id.numeric_part(), "461609500728");
    }

    #[test]
    fn test_numeric_part_without_separator() {
        let id = ShopId::new("12345");
        assert_eq!(id.numeric_part(), "12345");
    }

    #[test]
    fn test_cart_id_keeps_query_suffix() {
        // Cart GIDs carry a key after `?`; it is part of the identifier.
        let id = CartId::new("gid://shopify/Cart/c1-abc?key=def");
        assert_eq!(id.as_str(), "gid://shopify/Cart/c1-abc?key=def");
        assert_eq!(id.numeric_part(), "c1-abc?key=def");
    }

    #[test]
    fn test_serde_transparent() {
        let id = MenuId::new("gid://shopify/Menu/199655587896");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"gid://shopify/Menu/199655587896\"");
    }
}
