//! Cart line item domain type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use vitrine_core::{Price, ProductId};

use super::ProductCard;

const fn default_quantity() -> u32 {
    1
}

/// One cart entry: a product and how many of it.
///
/// Stored under `cart` as `{"id", "name", "price", "image", ..., "quantity"}`.
/// Any other fields the product carried are kept in `extra` and written back
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product identifier; unique within a cart.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Product image reference.
    #[serde(default)]
    pub image: String,
    /// Unknown product fields, preserved.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Always at least 1 for a stored item.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl CartLineItem {
    /// A new line item with quantity 1.
    #[must_use]
    pub fn from_product(product: &ProductCard) -> Self {
        Self {
            id: product.id.clone(),
            name: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            extra: Map::new(),
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }

    /// Sum of quantities, saturating at `u32::MAX`.
    #[must_use]
    pub fn unit_count(items: &[Self]) -> u32 {
        items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }
}
