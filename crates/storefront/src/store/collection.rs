//! Typed views over store keys.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KeyValueStore, StoreError};
use crate::error::report_internal;

/// An ordered list of `T` persisted as a JSON array under one key.
///
/// [`load`](Self::load) and [`save`](Self::save) never fail: unreadable or
/// corrupt data is logged and read as an empty list, and write failures are
/// logged and dropped. Use the `try_` variants to observe the error.
pub struct ListCollection<'a, S: ?Sized, T> {
    store: &'a S,
    key: &'static str,
    _item: PhantomData<fn() -> T>,
}

impl<'a, S, T> ListCollection<'a, S, T>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + DeserializeOwned,
{
    /// Bind a collection to `key` in `store`.
    #[must_use]
    pub const fn new(store: &'a S, key: &'static str) -> Self {
        Self {
            store,
            key,
            _item: PhantomData,
        }
    }

    /// The store key backing this collection.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Load the list, propagating storage and decoding errors.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the key cannot be read or does not hold a JSON
    /// array of `T`.
    pub fn try_load(&self) -> Result<Vec<T>, StoreError> {
        match self.store.get(self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Load the list, treating any failure as an empty list.
    #[must_use]
    pub fn load(&self) -> Vec<T> {
        self.try_load().unwrap_or_else(|e| {
            report_internal(&e, self.key, "Failed to load list, using empty");
            Vec::new()
        })
    }

    /// Persist the list, propagating errors.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the list cannot be encoded or written.
    pub fn try_save(&self, items: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items)?;
        self.store.set(self.key, &raw)
    }

    /// Persist the list, logging any failure.
    pub fn save(&self, items: &[T]) {
        if let Err(e) = self.try_save(items) {
            report_internal(&e, self.key, "Failed to save list");
        }
    }

    /// Load, let `f` modify the list, and save it back.
    ///
    /// Returns whatever `f` returns.
    pub fn update<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let mut items = self.load();
        let result = f(&mut items);
        self.save(&items);
        result
    }
}

/// A single optional record of `T` persisted under one key.
///
/// An absent key, a JSON `null` and corrupt data all read as `None`.
/// Clearing the record removes the key.
pub struct RecordSlot<'a, S: ?Sized, T> {
    store: &'a S,
    key: &'static str,
    _item: PhantomData<fn() -> T>,
}

impl<'a, S, T> RecordSlot<'a, S, T>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + DeserializeOwned,
{
    /// Bind a record slot to `key` in `store`.
    #[must_use]
    pub const fn new(store: &'a S, key: &'static str) -> Self {
        Self {
            store,
            key,
            _item: PhantomData,
        }
    }

    /// Load the record, propagating storage and decoding errors.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the key cannot be read or decoded.
    pub fn try_load(&self) -> Result<Option<T>, StoreError> {
        match self.store.get(self.key)? {
            Some(raw) => Ok(serde_json::from_str::<Option<T>>(&raw)?),
            None => Ok(None),
        }
    }

    /// Load the record, treating any failure as absent.
    #[must_use]
    pub fn load(&self) -> Option<T> {
        self.try_load().unwrap_or_else(|e| {
            report_internal(&e, self.key, "Failed to load record, treating as absent");
            None
        })
    }

    /// Store `value`, or remove the key when `None`.
    pub fn set(&self, value: Option<&T>) {
        let result = match value {
            Some(record) => {
                serde_json::to_string(record)
                    .map_err(StoreError::from)
                    .and_then(|raw| self.store.set(self.key, &raw))
            }
            None => self.store.remove(self.key),
        };
        if let Err(e) = result {
            report_internal(&e, self.key, "Failed to update record");
        }
    }

    /// Remove the record.
    pub fn clear(&self) {
        self.set(None);
    }
}
