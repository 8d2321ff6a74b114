//! Core types for the UNCMFRT storefront.

pub mod cart;
pub mod deferred;
pub mod id;
pub mod menu;

pub use cart::CartSnapshot;
pub use deferred::DeferredState;
pub use id::*;
pub use menu::{Menu, MenuItem, MenuItemType};
