//! Services backing the storefront header.
//!
//! - `analytics` - Fire-and-forget analytics event publishing
//! - `customer` - Login state of the current visitor

pub mod analytics;
pub mod customer;
