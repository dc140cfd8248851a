//! `vitrine cart ...`

use tracing::info;

use vitrine_core::ProductId;
use vitrine_storefront::store::JsonFileStore;
use vitrine_storefront::{Result, Storefront};

use crate::output;

type Shop = Storefront<JsonFileStore>;

/// Print the count badge and the items fragment.
pub fn show(storefront: &Shop) -> Result<()> {
    output::html(&storefront.cart_count()?)?;
    output::html(&storefront.cart_items()?)?;
    Ok(())
}

pub fn add(storefront: &mut Shop, product_id: &str) -> Result<()> {
    if storefront.add_to_cart(&ProductId::new(product_id))?.is_none() {
        output::alert(&format!("No product `{product_id}` on this page."));
    }
    show(storefront)
}

pub fn increase(storefront: &Shop, product_id: &str) -> Result<()> {
    storefront.increase(&ProductId::new(product_id))?;
    show(storefront)
}

pub fn decrease(storefront: &Shop, product_id: &str) -> Result<()> {
    storefront.decrease(&ProductId::new(product_id))?;
    show(storefront)
}

pub fn remove(storefront: &Shop, product_id: &str) -> Result<()> {
    storefront.remove_from_cart(&ProductId::new(product_id))?;
    show(storefront)
}

/// Check out; without a login the sidebar is printed instead.
pub fn checkout(storefront: &mut Shop) -> Result<()> {
    storefront.open_cart()?;
    match storefront.checkout() {
        Ok(receipt) => {
            info!(items = receipt.item_count, "Order confirmed");
            output::alert(&receipt.message());
            show(storefront)
        }
        Err(e) if storefront.is_sidebar_open() => {
            output::html(&storefront.sidebar()?)?;
            Err(e)
        }
        Err(e) => Err(e),
    }
}
