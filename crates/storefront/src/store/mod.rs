//! Key-value persistence for storefront state.
//!
//! Every widget persists into one shared string-keyed store, the same shape as
//! a browser origin's local storage: each key holds a JSON document.
//!
//! ## Keys
//!
//! - `clientes` - registered customers (array)
//! - `loggedClient` - the logged-in customer (record or absent)
//! - `cart` - cart line items (array)
//! - `avaliacoes` - product reviews (array)
//!
//! Widgets never talk to a [`KeyValueStore`] directly; they go through the
//! typed [`ListCollection`] and [`RecordSlot`] wrappers, which treat corrupt
//! or unreadable data as empty and log the failure instead of propagating it.

mod collection;
mod file;
mod memory;

pub use collection::{ListCollection, RecordSlot};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Store keys, one per persisted collection.
pub mod keys {
    /// Registered customers.
    pub const CUSTOMERS: &str = "clientes";
    /// The currently logged-in customer.
    pub const LOGGED_CLIENT: &str = "loggedClient";
    /// Cart line items.
    pub const CART: &str = "cart";
    /// Product reviews.
    pub const REVIEWS: &str = "avaliacoes";
}

/// Errors raised by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store cannot be used (e.g. a poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage scoped to one storefront.
///
/// Methods take `&self`; implementations handle their own interior
/// mutability so several services can borrow the same store at once.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
