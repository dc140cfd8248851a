//! Product grid fragment.

use askama::Template;

use crate::models::ProductCard;
use crate::search::SearchOutcome;

/// A product card as shown in the grid.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub image: String,
    pub hidden: bool,
}

/// Product grid, filtered by the last search.
#[derive(Template)]
#[template(path = "search/grid.html")]
pub struct ProductGridView {
    pub cards: Vec<ProductCardView>,
    pub show_placeholder: bool,
}

impl ProductGridView {
    /// Build the grid for `cards` after `outcome` was applied.
    #[must_use]
    pub fn new(cards: &[ProductCard], outcome: &SearchOutcome) -> Self {
        Self {
            cards: cards
                .iter()
                .map(|card| ProductCardView {
                    id: card.id.to_string(),
                    title: card.title.clone(),
                    price: card.price.to_string(),
                    image: card.image.clone(),
                    hidden: !outcome.is_visible(&card.id),
                })
                .collect(),
            show_placeholder: outcome.show_placeholder(),
        }
    }
}
