//! Product review domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitrine_core::Rating;

/// A submitted review, stored under `avaliacoes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer's name.
    pub name: String,
    /// One to five stars.
    pub rating: Rating,
    /// Review text.
    pub comment: String,
    /// Submission time.
    #[serde(with = "super::timestamp")]
    pub date: DateTime<Utc>,
}
