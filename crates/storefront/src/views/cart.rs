//! Cart fragments: line items, total and count badge.

use askama::Template;

use crate::models::CartLineItem;

/// Cart line item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    /// Unit price, e.g. `10,00`.
    pub price: String,
    pub quantity: u32,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            price: item.price.to_brl_string(),
            quantity: item.quantity,
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Sum of line totals, e.g. `25,00`.
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Build the view from stored line items.
    #[must_use]
    pub fn new(items: &[CartLineItem]) -> Self {
        Self {
            items: items.iter().map(CartItemView::from).collect(),
            total: items
                .iter()
                .map(CartLineItem::line_total)
                .sum::<vitrine_core::Price>()
                .to_brl_string(),
            item_count: CartLineItem::unit_count(items),
        }
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart items fragment, including the total.
#[derive(Template)]
#[template(path = "cart/items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment.
#[derive(Template)]
#[template(path = "cart/count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrine_core::{Price, ProductId};

    use super::*;
    use crate::models::ProductCard;

    fn item(id: &str, cents: i64, quantity: u32) -> CartLineItem {
        let mut item = CartLineItem::from_product(&ProductCard {
            id: ProductId::new(id),
            title: format!("Produto {id}"),
            price: Price::from_cents(cents),
            image: format!("img/{id}.jpg"),
        });
        item.quantity = quantity;
        item
    }

    #[test]
    fn test_empty_cart_placeholder() {
        let html = CartItemsTemplate {
            cart: CartView::new(&[]),
        }
        .render()
        .unwrap();
        assert!(html.contains("empty-cart"));
        assert!(!html.contains("cart-item-quantity"));
    }

    #[test]
    fn test_items_and_total() {
        let cart = CartView::new(&[item("p1", 1000, 2), item("p2", 500, 1)]);
        assert_eq!(cart.total, "25,00");
        assert_eq!(cart.item_count, 3);

        let html = CartItemsTemplate { cart }.render().unwrap();
        assert_eq!(html.matches("class=\"cart-item\"").count(), 2);
        assert!(html.contains("R$ 10,00"));
        assert!(html.contains("data-id=\"p2\""));
        assert!(html.contains("R$ 25,00"));
    }

    #[test]
    fn test_count_badge() {
        let html = CartCountTemplate { count: 3 }.render().unwrap();
        assert!(html.contains('3'));
    }
}
