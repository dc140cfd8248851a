//! View models and Askama templates for each widget.
//!
//! Services hand back domain values; these types turn them into
//! display-ready strings and render the HTML fragment the page swaps in.
//! Prices are formatted here, never in templates.

pub mod account;
pub mod carousel;
pub mod cart;
pub mod reviews;
pub mod search;

pub use account::{AuthForm, CustomerView, SidebarTemplate, SidebarView};
pub use carousel::{CarouselTrackTemplate, DotView, DotsTemplate, SlideView};
pub use cart::{CartCountTemplate, CartItemView, CartItemsTemplate, CartView};
pub use reviews::{ReviewEntryView, ReviewListView, StarInputTemplate};
pub use search::{ProductCardView, ProductGridView};
