//! `vitrine carousel play`

use tracing::info;

use vitrine_storefront::carousel::AutoplayDriver;
use vitrine_storefront::store::JsonFileStore;
use vitrine_storefront::views::{CarouselTrackTemplate, DotsTemplate};
use vitrine_storefront::{AppError, Result, Storefront};

use crate::output;

/// Run autoplay for `advances` steps, printing the dots after each one.
pub async fn play(storefront: &Storefront<JsonFileStore>, advances: usize) -> Result<()> {
    let slides = &storefront.page().slides;
    let carousel = storefront.carousel()?.clone();
    output::html(&CarouselTrackTemplate::new(&carousel, slides))?;
    output::html(&DotsTemplate::from(&carousel))?;

    // Mirror of the driven carousel, for rendering dots between steps
    let mut view = carousel.clone();
    let (driver, events, mut index) = AutoplayDriver::new(carousel);
    let handle = tokio::spawn(driver.run());

    for _ in 0..advances {
        index
            .changed()
            .await
            .map_err(|e| AppError::Internal(format!("carousel driver stopped: {e}")))?;
        let active = *index.borrow_and_update();
        info!(index = active, "Slide changed");
        view.go_to(isize::try_from(active).unwrap_or_default());
        output::html(&DotsTemplate::from(&view))?;
    }

    drop(events);
    let carousel = handle
        .await
        .map_err(|e| AppError::Internal(format!("carousel driver failed: {e}")))?;
    output::html(&CarouselTrackTemplate::new(&carousel, slides))?;
    Ok(())
}
