//! Vitrine Core - Shared types library.
//!
//! This crate provides common types used across all Vitrine components:
//! - `storefront` - Storefront widgets (search, reviews, accounts, cart, carousel)
//! - `cli` - Command-line adapter that drives the storefront against a local store
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no hashing. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, national identifiers,
//!   ratings and password digests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
