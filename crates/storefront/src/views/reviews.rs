//! Review list and star input fragments.

use askama::Template;

use crate::models::Review;
use crate::services::reviews::{StarIcon, StarInput};

/// A stored review ready for display.
#[derive(Debug, Clone)]
pub struct ReviewEntryView {
    pub name: String,
    pub comment: String,
    /// Filled stars followed by empty ones.
    pub stars: String,
    pub rating: u8,
    pub date: String,
}

impl From<&Review> for ReviewEntryView {
    fn from(review: &Review) -> Self {
        Self {
            name: review.name.clone(),
            comment: review.comment.clone(),
            stars: StarIcon::row(review.rating.stars())
                .iter()
                .map(|icon| icon.glyph())
                .collect(),
            rating: review.rating.stars(),
            date: review.date.format("%d/%m/%Y").to_string(),
        }
    }
}

/// The dynamic review list, newest first.
#[derive(Template)]
#[template(path = "reviews/list.html")]
pub struct ReviewListView {
    pub entries: Vec<ReviewEntryView>,
}

impl ReviewListView {
    /// Build the list from reviews already in display order.
    #[must_use]
    pub fn new(reviews: &[Review]) -> Self {
        Self {
            entries: reviews.iter().map(ReviewEntryView::from).collect(),
        }
    }
}

/// One star of the rating input.
#[derive(Debug, Clone, Copy)]
pub struct StarView {
    pub value: u8,
    pub filled: bool,
}

/// The five-star rating input and its hidden numeric field.
#[derive(Template)]
#[template(path = "reviews/stars.html")]
pub struct StarInputTemplate {
    pub stars: Vec<StarView>,
    pub committed: u8,
}

impl From<&StarInput> for StarInputTemplate {
    fn from(input: &StarInput) -> Self {
        Self {
            stars: (1u8..)
                .zip(input.icons())
                .map(|(value, icon)| StarView {
                    value,
                    filled: icon == StarIcon::Filled,
                })
                .collect(),
            committed: input.committed(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use vitrine_core::Rating;

    use super::*;

    fn review(name: &str, rating: u8, comment: &str) -> Review {
        Review {
            name: name.to_string(),
            rating: Rating::new(rating).unwrap(),
            comment: comment.to_string(),
            date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_stars_and_escaping() {
        let html = ReviewListView::new(&[review("<b>Ana</b>", 3, "Bom & barato")])
            .render()
            .unwrap();

        assert!(html.contains("★★★☆☆"));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("Bom & barato"));
        assert!(html.contains("&#60;b&#62;Ana&#60;/b&#62;"));
        assert!(html.contains("Bom &#38; barato"));
        assert!(html.contains("01/05/2024"));
    }

    #[test]
    fn test_one_entry_per_review() {
        let html = ReviewListView::new(&[review("A", 5, "x"), review("B", 1, "y")])
            .render()
            .unwrap();
        assert_eq!(html.matches("class=\"avaliacao-item\"").count(), 2);
    }

    #[test]
    fn test_star_input_shows_preview() {
        let mut input = StarInput::new();
        input.click(2);
        input.hover(4);

        let template = StarInputTemplate::from(&input);
        assert_eq!(template.stars.iter().filter(|s| s.filled).count(), 4);
        assert_eq!(template.committed, 2);

        let html = template.render().unwrap();
        assert!(html.contains("value=\"2\""));
    }
}
