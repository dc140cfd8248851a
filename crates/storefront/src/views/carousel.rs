//! Carousel fragments.

use askama::Template;

use crate::carousel::Carousel;
use crate::models::Slide;

/// One navigation dot.
#[derive(Debug, Clone)]
pub struct DotView {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

/// Navigation dots, one per slide.
#[derive(Template)]
#[template(path = "carousel/dots.html")]
pub struct DotsTemplate {
    pub dots: Vec<DotView>,
}

impl From<&Carousel> for DotsTemplate {
    fn from(carousel: &Carousel) -> Self {
        Self {
            dots: (0..carousel.slide_count())
                .map(|i| DotView {
                    index: i,
                    label: format!("Go to slide {}", i + 1),
                    selected: i == carousel.index(),
                })
                .collect(),
        }
    }
}

/// A slide as rendered in the track.
#[derive(Debug, Clone)]
pub struct SlideView {
    pub image: String,
    /// Empty when the slide has no caption.
    pub caption: String,
}

/// The slide track with its current transform.
#[derive(Template)]
#[template(path = "carousel/track.html")]
pub struct CarouselTrackTemplate {
    pub slides: Vec<SlideView>,
    pub style: String,
}

impl CarouselTrackTemplate {
    #[must_use]
    pub fn new(carousel: &Carousel, slides: &[Slide]) -> Self {
        Self {
            slides: slides
                .iter()
                .map(|slide| SlideView {
                    image: slide.image.clone(),
                    caption: slide.caption.clone().unwrap_or_default(),
                })
                .collect(),
            style: format!(
                "transform: {}; transition: {};",
                carousel.track_transform(),
                carousel.transition_css()
            ),
        }
    }
}
