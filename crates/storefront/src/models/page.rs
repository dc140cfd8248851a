//! Page manifest: the widgets and products present on the page.
//!
//! The manifest stands in for the page markup. A widget whose elements are
//! missing from the manifest is skipped at initialization.

use serde::{Deserialize, Serialize};

use vitrine_core::{Price, ProductId};

/// A product card in the product grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCard {
    /// Product identifier (the add-to-cart button's `data-id`).
    pub id: ProductId,
    /// Card title, used by the search filter and as the cart item name.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Image reference.
    #[serde(default)]
    pub image: String,
}

/// A carousel slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Image reference.
    pub image: String,
    /// Optional caption.
    #[serde(default)]
    pub caption: Option<String>,
}

/// Everything the storefront needs to know about the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageManifest {
    /// Product cards in grid order.
    #[serde(default)]
    pub products: Vec<ProductCard>,
    /// Whether the review form and star input are on the page.
    #[serde(default)]
    pub review_form: bool,
    /// Whether the customer sidebar is on the page.
    #[serde(default)]
    pub account_sidebar: bool,
    /// Whether the cart icon and cart sidebar are on the page.
    #[serde(default)]
    pub cart: bool,
    /// Carousel slides in display order.
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl PageManifest {
    /// Look up a product card by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&ProductCard> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// The built-in demo page: four products, every widget, three slides.
    #[must_use]
    pub fn demo() -> Self {
        let product = |id: &str, title: &str, cents: i64| ProductCard {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::from_cents(cents),
            image: format!("img/{id}.jpg"),
        };
        let slide = |n: u8| Slide {
            image: format!("img/banner-{n}.jpg"),
            caption: None,
        };

        Self {
            products: vec![
                product("p1", "Camiseta Básica", 4990),
                product("p2", "Calça Jeans", 12990),
                product("p3", "Tênis Esportivo", 19990),
                product("p4", "Boné Preto", 3990),
            ],
            review_form: true,
            account_sidebar: true,
            cart: true,
            slides: (1..=3).map(slide).collect(),
        }
    }
}
