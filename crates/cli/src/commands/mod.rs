//! Command implementations.
//!
//! Each command works on a [`Storefront`] over the JSON store file and
//! renders the fragment it changed.

pub mod account;
pub mod carousel;
pub mod cart;
pub mod review;
pub mod search;

use std::path::Path;

use tracing::info;

use vitrine_storefront::models::PageManifest;
use vitrine_storefront::store::JsonFileStore;
use vitrine_storefront::{Storefront, StorefrontConfig};

/// Open the storefront described by `config`.
///
/// # Errors
///
/// Returns an error if the page manifest cannot be read or parsed.
pub async fn open(
    config: StorefrontConfig,
) -> Result<Storefront<JsonFileStore>, Box<dyn std::error::Error>> {
    let page = match &config.page_path {
        Some(path) => load_page(path).await?,
        None => PageManifest::demo(),
    };
    let store = JsonFileStore::new(&config.store_path);
    info!(store = %config.store_path.display(), "Opening storefront");
    Ok(Storefront::new(store, page, config))
}

async fn load_page(path: &Path) -> Result<PageManifest, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("Page manifest not found: {}", path.display()).into());
    }
    let content = tokio::fs::read_to_string(path).await?;
    let page: PageManifest = serde_json::from_str(&content)?;
    info!(
        path = %path.display(),
        products = page.products.len(),
        slides = page.slides.len(),
        "Loaded page manifest"
    );
    Ok(page)
}
