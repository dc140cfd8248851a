//! Vitrine storefront library.
//!
//! The interactive widgets of a single storefront page (product search,
//! reviews, customer accounts, cart and carousel) as plain Rust state over an
//! injectable key-value store. Views render HTML fragments with Askama; the
//! `vitrine` CLI is one adapter over this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carousel;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod services;
pub mod state;
pub mod store;
pub mod views;

pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use state::Storefront;
