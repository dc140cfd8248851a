//! Business logic services for storefront widgets.
//!
//! # Services
//!
//! - `auth` - Customer registration, login, logout and removal
//! - `cart` - Cart line items, totals and checkout
//! - `reviews` - Star input and review submission
//!
//! Every service borrows the shared [`KeyValueStore`](crate::store::KeyValueStore)
//! and reads it fresh on each call; none caches persisted state.

pub mod auth;
pub mod cart;
pub mod reviews;
