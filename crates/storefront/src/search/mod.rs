//! Product grid search filter.
//!
//! Filtering is a case-insensitive substring match of the query against each
//! card's title. The filter only decides which cards are visible; rendering
//! the grid (and its "no products" placeholder) is left to
//! [`crate::views::ProductGridView`].

use tracing::{debug, info, instrument};

use vitrine_core::ProductId;

use crate::models::ProductCard;

/// The key that triggers a search from the query field.
pub const TRIGGER_KEY: &str = "Enter";

/// Result of applying a query to the product grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The normalized query (trimmed, lower-cased).
    pub query: String,
    /// Visible cards in grid order.
    pub visible: Vec<ProductId>,
    /// Hidden cards in grid order.
    pub hidden: Vec<ProductId>,
}

impl SearchOutcome {
    /// Whether the "no products found" placeholder should be shown.
    #[must_use]
    pub fn show_placeholder(&self) -> bool {
        self.visible.is_empty()
    }

    /// Whether the card with `id` is visible.
    #[must_use]
    pub fn is_visible(&self, id: &ProductId) -> bool {
        self.visible.contains(id)
    }
}

struct IndexedCard {
    id: ProductId,
    title: String,
}

/// Search filter over the product cards on the page.
pub struct SearchFilter {
    cards: Vec<IndexedCard>,
}

impl SearchFilter {
    /// Index `cards` for filtering.
    ///
    /// Returns `None` (and logs) when the page has no product cards.
    #[must_use]
    pub fn new(cards: &[ProductCard]) -> Option<Self> {
        if cards.is_empty() {
            info!("No product cards on page, search filter disabled");
            return None;
        }

        let cards = cards
            .iter()
            .map(|card| IndexedCard {
                id: card.id.clone(),
                title: card.title.trim().to_lowercase(),
            })
            .collect::<Vec<_>>();
        debug!(cards = cards.len(), "Search filter ready");
        Some(Self { cards })
    }

    /// Filter the grid by `query`. An empty query shows every card.
    #[instrument(skip(self))]
    pub fn apply(&self, query: &str) -> SearchOutcome {
        let query = query.trim().to_lowercase();
        let (visible, hidden): (Vec<_>, Vec<_>) = self
            .cards
            .iter()
            .partition(|card| query.is_empty() || card.title.contains(&query));

        let outcome = SearchOutcome {
            query,
            visible: visible.into_iter().map(|c| c.id.clone()).collect(),
            hidden: hidden.into_iter().map(|c| c.id.clone()).collect(),
        };
        debug!(visible = outcome.visible.len(), "Search applied");
        outcome
    }

    /// Handle a key press in the query field.
    ///
    /// Only [`TRIGGER_KEY`] runs the search.
    pub fn on_key(&self, key: &str, query: &str) -> Option<SearchOutcome> {
        (key == TRIGGER_KEY).then(|| self.apply(query))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::PageManifest;

    fn ids(ids: &[&str]) -> Vec<ProductId> {
        ids.iter().copied().map(ProductId::new).collect()
    }

    #[test]
    fn test_no_cards_disables_filter() {
        assert!(SearchFilter::new(&[]).is_none());
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let page = PageManifest::demo();
        let filter = SearchFilter::new(&page.products).unwrap();

        let outcome = filter.apply("   ");
        assert_eq!(outcome.visible, ids(&["p1", "p2", "p3", "p4"]));
        assert!(outcome.hidden.is_empty());
        assert!(!outcome.show_placeholder());
    }

    #[test]
    fn test_case_insensitive_substring() {
        let page = PageManifest::demo();
        let filter = SearchFilter::new(&page.products).unwrap();

        let outcome = filter.apply("  CALÇA ");
        assert_eq!(outcome.query, "calça");
        assert_eq!(outcome.visible, ids(&["p2"]));
        assert_eq!(outcome.hidden, ids(&["p1", "p3", "p4"]));
        assert!(outcome.is_visible(&ProductId::new("p2")));
    }

    #[test]
    fn test_no_match_shows_placeholder() {
        let page = PageManifest::demo();
        let filter = SearchFilter::new(&page.products).unwrap();

        let outcome = filter.apply("geladeira");
        assert!(outcome.visible.is_empty());
        assert!(outcome.show_placeholder());
    }

    #[test]
    fn test_only_enter_triggers() {
        let page = PageManifest::demo();
        let filter = SearchFilter::new(&page.products).unwrap();

        assert!(filter.on_key("a", "boné").is_none());
        assert_eq!(
            filter.on_key("Enter", "boné").map(|o| o.visible),
            Some(ids(&["p4"]))
        );
    }
}
