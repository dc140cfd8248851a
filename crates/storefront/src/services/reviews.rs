//! Product reviews: the star input and the review list.

use thiserror::Error;
use tracing::{info, instrument};

use vitrine_core::{Rating, RatingError};

use crate::error::add_breadcrumb;
use crate::models::{Review, timestamp};
use crate::store::{KeyValueStore, ListCollection, keys};

/// Review submission failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReviewError {
    /// Name, comment or rating missing.
    #[error("Please fill in your name, a comment and a rating.")]
    Incomplete,

    /// A typed-in rating outside 1 to 5.
    #[error("Please choose a rating from 1 to 5 ({0}).")]
    InvalidRating(#[from] RatingError),
}

/// One star icon in the star input or a rendered review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarIcon {
    Filled,
    Empty,
}

impl StarIcon {
    /// The glyph shown for this icon.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Filled => "★",
            Self::Empty => "☆",
        }
    }

    /// The first `filled` of five icons filled, the rest empty.
    #[must_use]
    pub fn row(filled: u8) -> [Self; Rating::MAX as usize] {
        std::array::from_fn(|i| {
            if i < usize::from(filled) {
                Self::Filled
            } else {
                Self::Empty
            }
        })
    }
}

/// The five-star rating input.
///
/// `committed` is the value held by the hidden numeric field; `0` means no
/// rating yet. `preview` is set while the pointer hovers over a star.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarInput {
    committed: u8,
    preview: Option<u8>,
}

impl StarInput {
    /// An input with no rating.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            committed: 0,
            preview: None,
        }
    }

    /// Pointer entered star `i` (1-based).
    pub fn hover(&mut self, i: u8) {
        self.preview = Some(i.min(Rating::MAX));
    }

    /// Pointer left the stars.
    pub const fn leave(&mut self) {
        self.preview = None;
    }

    /// Star `i` (1-based) was clicked.
    pub fn click(&mut self, i: u8) {
        self.committed = i.min(Rating::MAX);
        self.preview = None;
    }

    /// The committed value, `0` if none.
    #[must_use]
    pub const fn committed(&self) -> u8 {
        self.committed
    }

    /// The committed value as a rating, if one was chosen.
    #[must_use]
    pub fn rating(&self) -> Option<Rating> {
        Rating::new(self.committed).ok()
    }

    /// How many stars are shown filled right now.
    #[must_use]
    pub fn displayed(&self) -> u8 {
        self.preview.unwrap_or(self.committed)
    }

    /// The five icons as currently shown.
    #[must_use]
    pub fn icons(&self) -> [StarIcon; Rating::MAX as usize] {
        StarIcon::row(self.displayed())
    }

    /// Back to no rating.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Review form fields other than the rating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewForm {
    pub name: String,
    pub comment: String,
}

/// Review service over the `avaliacoes` key.
pub struct ReviewService<'a, S: ?Sized> {
    reviews: ListCollection<'a, S, Review>,
}

impl<'a, S: KeyValueStore + ?Sized> ReviewService<'a, S> {
    /// Create a new review service over `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            reviews: ListCollection::new(store, keys::REVIEWS),
        }
    }

    /// Validate and store a review, then reset the star input.
    ///
    /// The form itself is left to the caller to clear.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Incomplete` if the trimmed name or comment is
    /// empty or no rating was committed. Nothing is stored in that case.
    #[instrument(skip_all)]
    pub fn submit(&self, form: &ReviewForm, stars: &mut StarInput) -> Result<Review, ReviewError> {
        let name = form.name.trim();
        let comment = form.comment.trim();
        let rating = stars.rating().ok_or(ReviewError::Incomplete)?;
        if name.is_empty() || comment.is_empty() {
            return Err(ReviewError::Incomplete);
        }

        let review = Review {
            name: name.to_owned(),
            rating,
            comment: comment.to_owned(),
            date: timestamp::now(),
        };

        let total = self.reviews.update(|reviews| {
            reviews.push(review.clone());
            reviews.len()
        });
        stars.reset();

        info!(rating = rating.stars(), total_reviews = total, "Review submitted");
        add_breadcrumb("reviews", "Submitted review", None);
        Ok(review)
    }

    /// Stored reviews, newest first.
    #[must_use]
    pub fn newest_first(&self) -> Vec<Review> {
        let mut reviews = self.reviews.load();
        reviews.reverse();
        reviews
    }
}
