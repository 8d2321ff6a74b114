//! UNCMFRT Core - Shared types library.
//!
//! Types used by the storefront header and its tests:
//! - Shopify global IDs
//! - Navigation menus as returned by the Storefront API
//! - Cart snapshots
//! - The three-state [`DeferredState`] observed by the header while
//!   asynchronous values resolve
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no runtime.
//! This keeps it lightweight and allows it to be used anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
