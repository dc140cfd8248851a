//! Cart service.
//!
//! Line items are addressed by product id rather than list position: each id
//! appears at most once, so it is a stable handle that survives re-renders and
//! concurrent removals. The position is looked up fresh on every mutation.

use thiserror::Error;
use tracing::{info, instrument, warn};

use vitrine_core::{Price, ProductId};

use crate::error::add_breadcrumb;
use crate::models::{CartLineItem, Customer, ProductCard};
use crate::store::{KeyValueStore, ListCollection, RecordSlot, keys};

/// Errors that can occur at checkout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Nothing to check out.
    #[error("Your cart is empty!")]
    Empty,

    /// Checkout needs a logged-in customer.
    #[error("Please log in before checking out.")]
    LoginRequired,
}

/// Confirmation of a completed (simulated) checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// Name of the logged-in customer.
    pub customer_name: String,
    /// Cart total at checkout.
    pub total: Price,
    /// Number of units purchased.
    pub item_count: u32,
}

impl CheckoutReceipt {
    /// Confirmation text shown to the customer.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Order completed successfully for {}! Total: {}",
            self.customer_name, self.total
        )
    }
}

/// Cart service over the `cart` key.
pub struct CartService<'a, S: ?Sized> {
    items: ListCollection<'a, S, CartLineItem>,
    session: RecordSlot<'a, S, Customer>,
}

impl<'a, S: KeyValueStore + ?Sized> CartService<'a, S> {
    /// Create a new cart service over `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            items: ListCollection::new(store, keys::CART),
            session: RecordSlot::new(store, keys::LOGGED_CLIENT),
        }
    }

    /// Add one unit of `product`.
    ///
    /// Returns the line item as stored after the change.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&self, product: &ProductCard) -> CartLineItem {
        let item = self.items.update(|items| {
            if let Some(existing) = items.iter_mut().find(|i| i.id == product.id) {
                existing.quantity = existing.quantity.saturating_add(1);
                existing.clone()
            } else {
                let item = CartLineItem::from_product(product);
                items.push(item.clone());
                item
            }
        });

        info!(quantity = item.quantity, "Added to cart");
        add_breadcrumb(
            "cart",
            "Added product",
            Some(&[("product_id", product.id.as_str())]),
        );
        item
    }

    /// Add one unit to an existing line item.
    ///
    /// Returns the new quantity, or `None` if the product is not in the cart.
    #[instrument(skip(self))]
    pub fn increase(&self, id: &ProductId) -> Option<u32> {
        let quantity = self.items.update(|items| {
            let item = items.iter_mut().find(|i| &i.id == id)?;
            item.quantity = item.quantity.saturating_add(1);
            Some(item.quantity)
        });
        if quantity.is_none() {
            warn!("Increase ignored: product not in cart");
        }
        quantity
    }

    /// Remove one unit; a line item at quantity 1 is removed entirely.
    ///
    /// Returns the new quantity (`0` when the line item was removed), or
    /// `None` if the product is not in the cart.
    #[instrument(skip(self))]
    pub fn decrease(&self, id: &ProductId) -> Option<u32> {
        let quantity = self.items.update(|items| {
            let position = items.iter().position(|i| &i.id == id)?;
            let item = items.get_mut(position)?;
            if item.quantity > 1 {
                item.quantity -= 1;
                Some(item.quantity)
            } else {
                items.remove(position);
                Some(0)
            }
        });
        if quantity.is_none() {
            warn!("Decrease ignored: product not in cart");
        }
        quantity
    }

    /// Remove a line item regardless of quantity.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &ProductId) -> Option<CartLineItem> {
        let removed = self.items.update(|items| {
            let position = items.iter().position(|i| &i.id == id)?;
            Some(items.remove(position))
        });
        if removed.is_none() {
            warn!("Remove ignored: product not in cart");
        }
        removed
    }

    /// Line items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> Vec<CartLineItem> {
        self.items.load()
    }

    /// Total units in the cart (sum of quantities).
    #[must_use]
    pub fn count(&self) -> u32 {
        CartLineItem::unit_count(&self.items())
    }

    /// Sum of unit price times quantity.
    #[must_use]
    pub fn total(&self) -> Price {
        total(&self.items())
    }

    /// Check out: requires a non-empty cart and a logged-in customer.
    ///
    /// On success the cart is emptied. No order is recorded.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Empty` if the cart has no items.
    /// Returns `CartError::LoginRequired` if nobody is logged in.
    #[instrument(skip(self))]
    pub fn checkout(&self) -> Result<CheckoutReceipt, CartError> {
        let items = self.items();
        if items.is_empty() {
            return Err(CartError::Empty);
        }

        let customer = self.session.load().ok_or(CartError::LoginRequired)?;

        let receipt = CheckoutReceipt {
            customer_name: customer.name,
            total: total(&items),
            item_count: CartLineItem::unit_count(&items),
        };

        self.items.save(&[]);
        info!(total = %receipt.total, items = receipt.item_count, "Checkout completed");
        add_breadcrumb("cart", "Checked out", None);
        Ok(receipt)
    }
}

fn total(items: &[CartLineItem]) -> Price {
    items.iter().map(CartLineItem::line_total).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::auth::{AccountService, RegistrationForm};
    use crate::store::MemoryStore;
    use secrecy::SecretString;

    fn product(id: &str, cents: i64) -> ProductCard {
        ProductCard {
            id: ProductId::new(id),
            title: format!("Produto {id}"),
            price: Price::from_cents(cents),
            image: format!("img/{id}.jpg"),
        }
    }

    fn log_in(store: &MemoryStore) {
        AccountService::new(store, false)
            .register(RegistrationForm {
                name: "Ana".to_string(),
                national_id: "123.456.789-09".to_string(),
                address: "Rua A".to_string(),
                password: SecretString::from("senha".to_string()),
            })
            .unwrap();
    }

    #[test]
    fn test_adding_twice_increments_quantity() {
        let store = MemoryStore::new();
        let cart = CartService::new(&store);

        cart.add(&product("p1", 1000));
        let item = cart.add(&product("p1", 1000));

        assert_eq!(item.quantity, 2);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_totals_and_count() {
        let store = MemoryStore::new();
        let cart = CartService::new(&store);

        cart.add(&product("p1", 1000));
        cart.add(&product("p1", 1000));
        cart.add(&product("p2", 500));

        let items = cart.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items.first().map(|i| i.quantity), Some(2));
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total().to_brl_string(), "25,00");
    }

    #[test]
    fn test_decrease_at_one_removes_item() {
        let store = MemoryStore::new();
        let cart = CartService::new(&store);
        let p1 = ProductId::new("p1");

        cart.add(&product("p1", 1000));
        cart.add(&product("p1", 1000));

        assert_eq!(cart.decrease(&p1), Some(1));
        assert_eq!(cart.decrease(&p1), Some(0));
        assert!(cart.items().is_empty());
        assert_eq!(cart.decrease(&p1), None);
    }

    #[test]
    fn test_increase_and_remove_by_id() {
        let store = MemoryStore::new();
        let cart = CartService::new(&store);

        cart.add(&product("p1", 1000));
        cart.add(&product("p2", 500));

        assert_eq!(cart.increase(&ProductId::new("p2")), Some(2));
        assert_eq!(cart.increase(&ProductId::new("zz")), None);

        let removed = cart.remove(&ProductId::new("p1")).unwrap();
        assert_eq!(removed.id, ProductId::new("p1"));
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_count_of_huge_stored_quantities_does_not_overflow() {
        let store = MemoryStore::with_entries([(
            keys::CART,
            r#"[{"id":"p1","name":"A","price":1,"image":"","quantity":4294967295},{"id":"p2","name":"B","price":1,"image":"","quantity":1}]"#,
        )]);
        let cart = CartService::new(&store);
        assert_eq!(cart.count(), u32::MAX);
        assert_eq!(crate::views::CartView::new(&cart.items()).item_count, u32::MAX);
    }

    #[test]
    fn test_checkout_empty_cart() {
        let store = MemoryStore::new();
        log_in(&store);
        let logged_before = store.get(keys::LOGGED_CLIENT).unwrap();

        let cart = CartService::new(&store);
        assert_eq!(cart.checkout(), Err(CartError::Empty));
        assert_eq!(store.get(keys::LOGGED_CLIENT).unwrap(), logged_before);
    }

    #[test]
    fn test_checkout_requires_login() {
        let store = MemoryStore::new();
        let cart = CartService::new(&store);
        cart.add(&product("p1", 1000));

        assert_eq!(cart.checkout(), Err(CartError::LoginRequired));
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_checkout_clears_cart() {
        let store = MemoryStore::new();
        log_in(&store);
        let cart = CartService::new(&store);
        cart.add(&product("p1", 1000));
        cart.add(&product("p2", 550));

        let receipt = cart.checkout().unwrap();

        assert_eq!(receipt.customer_name, "Ana");
        assert_eq!(receipt.total.to_brl_string(), "15,50");
        assert_eq!(receipt.item_count, 2);
        assert_eq!(
            receipt.message(),
            "Order completed successfully for Ana! Total: R$ 15,50"
        );
        assert!(cart.items().is_empty());
        assert_eq!(store.get(keys::CART).unwrap().as_deref(), Some("[]"));
    }
}
