//! `vitrine review ...`

use vitrine_core::Rating;
use vitrine_storefront::services::reviews::{ReviewError, ReviewForm};
use vitrine_storefront::store::JsonFileStore;
use vitrine_storefront::{Result, Storefront};

use crate::output;

type Shop = Storefront<JsonFileStore>;

/// Validate a rating typed on the command line; out-of-range values are an
/// alert, not a clamp.
fn parse_rating(value: u8) -> Result<Rating> {
    Ok(Rating::new(value).map_err(ReviewError::from)?)
}

pub fn add(storefront: &mut Shop, name: String, rating: u8, comment: String) -> Result<()> {
    let rating = parse_rating(rating)?;
    storefront.stars_mut()?.click(rating.stars());
    storefront.submit_review(&ReviewForm { name, comment })?;
    list(storefront)
}

pub fn list(storefront: &Shop) -> Result<()> {
    output::html(&storefront.review_list()?)?;
    Ok(())
}
