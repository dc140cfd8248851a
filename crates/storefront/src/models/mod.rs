//! Domain models persisted in the store.
//!
//! Field names on the wire are fixed by data already sitting in customers'
//! stores, hence the `serde(rename)` attributes on the Portuguese keys.

pub mod cart;
pub mod customer;
pub mod page;
pub mod review;
pub(crate) mod timestamp;

pub use cart::CartLineItem;
pub use customer::Customer;
pub use page::{PageManifest, ProductCard, Slide};
pub use review::Review;
