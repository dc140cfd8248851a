//! `vitrine search`

use vitrine_storefront::store::JsonFileStore;
use vitrine_storefront::{Result, Storefront};

use crate::output;

/// Filter the grid and print it.
pub fn run(storefront: &Storefront<JsonFileStore>, query: &str) -> Result<()> {
    let grid = storefront.product_grid(query)?;
    output::html(&grid)?;
    Ok(())
}
