//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod id;
pub mod national_id;
pub mod price;
pub mod rating;

pub use credential::PasswordDigest;
pub use id::*;
pub use national_id::{NationalId, NationalIdError};
pub use price::Price;
pub use rating::{Rating, RatingError};
