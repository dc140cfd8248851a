//! Storefront state shared across widgets.
//!
//! [`Storefront`] owns the store, the page manifest and the per-widget UI
//! state. Each widget is initialized on its own from the manifest: a widget
//! missing from the page stays `None` and every call into it returns
//! [`AppError::FeatureUnavailable`], while the other widgets keep working.

use tracing::{info, instrument, warn};

use vitrine_core::{NationalId, ProductId};

use crate::carousel::Carousel;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::models::{CartLineItem, Customer, PageManifest, Review};
use crate::search::{SearchFilter, SearchOutcome};
use crate::services::auth::{AccountService, LoginForm, RegistrationForm};
use crate::services::cart::{CartError, CartService, CheckoutReceipt};
use crate::services::reviews::{ReviewForm, ReviewService, StarInput};
use crate::store::KeyValueStore;
use crate::views::{
    AuthForm, CarouselTrackTemplate, CartCountTemplate, CartItemsTemplate, CartView, DotsTemplate,
    ProductGridView, ReviewListView, SidebarTemplate, SidebarView, StarInputTemplate,
};

/// Customer sidebar UI state.
#[derive(Debug, Clone, Copy, Default)]
struct SidebarState {
    open: bool,
    form: AuthForm,
}

/// Cart panel UI state.
#[derive(Debug, Clone, Copy, Default)]
struct CartPanel {
    open: bool,
}

/// The storefront: every widget on one page, over one store.
pub struct Storefront<S> {
    store: S,
    page: PageManifest,
    config: StorefrontConfig,
    search: Option<SearchFilter>,
    stars: Option<StarInput>,
    sidebar: Option<SidebarState>,
    cart: Option<CartPanel>,
    carousel: Option<Carousel>,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Initialize every widget present on `page`.
    #[instrument(skip_all)]
    pub fn new(store: S, page: PageManifest, config: StorefrontConfig) -> Self {
        let search = SearchFilter::new(&page.products);

        let stars = page.review_form.then(StarInput::new);
        if stars.is_none() {
            info!("No review form on page, reviews disabled");
        }

        let sidebar = page.account_sidebar.then(SidebarState::default);
        if sidebar.is_none() {
            info!("No customer sidebar on page, accounts disabled");
        }

        let cart = page.cart.then(CartPanel::default);
        if cart.is_none() {
            info!("No cart on page, cart disabled");
        }

        let carousel = Carousel::new(page.slides.len(), config.carousel);

        let storefront = Self {
            store,
            page,
            config,
            search,
            stars,
            sidebar,
            cart,
            carousel,
        };
        info!(
            search = storefront.search.is_some(),
            reviews = storefront.stars.is_some(),
            accounts = storefront.sidebar.is_some(),
            cart = storefront.cart.is_some(),
            carousel = storefront.carousel.is_some(),
            "Storefront initialized"
        );
        storefront
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The page manifest.
    #[must_use]
    pub const fn page(&self) -> &PageManifest {
        &self.page
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Filter the product grid by `query`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no products.
    pub fn search(&self, query: &str) -> Result<SearchOutcome> {
        let filter = self
            .search
            .as_ref()
            .ok_or(AppError::FeatureUnavailable("Search"))?;
        Ok(filter.apply(query))
    }

    /// Filter the grid and build its view.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no products.
    pub fn product_grid(&self, query: &str) -> Result<ProductGridView> {
        let outcome = self.search(query)?;
        Ok(ProductGridView::new(&self.page.products, &outcome))
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// The star input, for hover, leave and click events.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no review form.
    pub fn stars_mut(&mut self) -> Result<&mut StarInput> {
        self.stars
            .as_mut()
            .ok_or(AppError::FeatureUnavailable("Reviews"))
    }

    /// The star input view.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no review form.
    pub fn star_input(&self) -> Result<StarInputTemplate> {
        let stars = self
            .stars
            .as_ref()
            .ok_or(AppError::FeatureUnavailable("Reviews"))?;
        Ok(StarInputTemplate::from(stars))
    }

    /// Submit the review form with the current star rating.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Review` if the submission is incomplete, or
    /// `AppError::FeatureUnavailable` if the page has no review form.
    pub fn submit_review(&mut self, form: &ReviewForm) -> Result<Review> {
        let stars = self
            .stars
            .as_mut()
            .ok_or(AppError::FeatureUnavailable("Reviews"))?;
        Ok(ReviewService::new(&self.store).submit(form, stars)?)
    }

    /// Stored reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no review form.
    pub fn review_list(&self) -> Result<ReviewListView> {
        if self.stars.is_none() {
            return Err(AppError::FeatureUnavailable("Reviews"));
        }
        Ok(ReviewListView::new(
            &ReviewService::new(&self.store).newest_first(),
        ))
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    fn accounts(&self) -> Result<AccountService<'_, S>> {
        if self.sidebar.is_none() {
            return Err(AppError::FeatureUnavailable("Accounts"));
        }
        Ok(AccountService::new(
            &self.store,
            self.config.accept_legacy_passwords,
        ))
    }

    fn sidebar_mut(&mut self) -> Result<&mut SidebarState> {
        self.sidebar
            .as_mut()
            .ok_or(AppError::FeatureUnavailable("Accounts"))
    }

    /// Register a customer and log them in.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` on validation failure.
    pub fn register(&mut self, form: RegistrationForm) -> Result<Customer> {
        let customer = self.accounts()?.register(form)?;
        self.sidebar_mut()?.form = AuthForm::Login;
        Ok(customer)
    }

    /// Log a customer in.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` on validation failure.
    pub fn login(&mut self, form: LoginForm) -> Result<Customer> {
        Ok(self.accounts()?.login(form)?)
    }

    /// Log the current customer out.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no sidebar.
    pub fn logout(&mut self) -> Result<()> {
        self.accounts()?.logout();
        Ok(())
    }

    /// Remove a customer by identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no sidebar.
    pub fn remove_customer(&mut self, national_id: &NationalId) -> Result<Option<Customer>> {
        Ok(self.accounts()?.remove(national_id))
    }

    /// The logged-in customer, if any.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no sidebar.
    pub fn logged_in(&self) -> Result<Option<Customer>> {
        Ok(self.accounts()?.logged_in())
    }

    /// Switch between the login and registration forms.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no sidebar.
    pub fn toggle_auth_form(&mut self) -> Result<AuthForm> {
        let sidebar = self.sidebar_mut()?;
        sidebar.form = sidebar.form.toggled();
        Ok(sidebar.form)
    }

    /// Open the sidebar and render it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no sidebar.
    pub fn open_sidebar(&mut self) -> Result<SidebarTemplate> {
        self.sidebar_mut()?.open = true;
        self.sidebar()
    }

    /// Close the sidebar.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no sidebar.
    pub fn close_sidebar(&mut self) -> Result<()> {
        self.sidebar_mut()?.open = false;
        Ok(())
    }

    /// The sidebar as currently shown.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no sidebar.
    pub fn sidebar(&self) -> Result<SidebarTemplate> {
        let accounts = self.accounts()?;
        let state = self.sidebar.unwrap_or_default();
        let view = SidebarView::new(
            accounts.logged_in().as_ref(),
            &accounts.customers(),
            state.form,
        );
        Ok(SidebarTemplate::new(view, state.open))
    }

    /// Whether the sidebar is open.
    #[must_use]
    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar.is_some_and(|s| s.open)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    fn cart_service(&self) -> Result<CartService<'_, S>> {
        if self.cart.is_none() {
            return Err(AppError::FeatureUnavailable("Cart"));
        }
        Ok(CartService::new(&self.store))
    }

    /// Add one unit of a product on this page and open the cart panel.
    ///
    /// Returns `None` (and logs) if the page has no product with `id`; the
    /// panel is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no cart.
    pub fn add_to_cart(&mut self, id: &ProductId) -> Result<Option<CartLineItem>> {
        let cart = self.cart_service()?;
        let Some(product) = self.page.product(id) else {
            warn!(product_id = %id, "Add ignored: product not on page");
            return Ok(None);
        };
        let item = cart.add(product);
        self.cart_panel_mut()?.open = true;
        Ok(Some(item))
    }

    /// Add one unit to a line item.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no cart.
    pub fn increase(&self, id: &ProductId) -> Result<Option<u32>> {
        Ok(self.cart_service()?.increase(id))
    }

    /// Remove one unit from a line item.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no cart.
    pub fn decrease(&self, id: &ProductId) -> Result<Option<u32>> {
        Ok(self.cart_service()?.decrease(id))
    }

    /// Remove a line item.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no cart.
    pub fn remove_from_cart(&self, id: &ProductId) -> Result<Option<CartLineItem>> {
        Ok(self.cart_service()?.remove(id))
    }

    /// Open the cart panel.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no cart.
    pub fn open_cart(&mut self) -> Result<()> {
        self.cart_panel_mut()?.open = true;
        Ok(())
    }

    /// Close the cart panel.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no cart.
    pub fn close_cart(&mut self) -> Result<()> {
        self.cart_panel_mut()?.open = false;
        Ok(())
    }

    /// Whether the cart panel is open.
    #[must_use]
    pub fn is_cart_open(&self) -> bool {
        self.cart.is_some_and(|c| c.open)
    }

    fn cart_panel_mut(&mut self) -> Result<&mut CartPanel> {
        self.cart.as_mut().ok_or(AppError::FeatureUnavailable("Cart"))
    }

    /// The cart contents.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no cart.
    pub fn cart_view(&self) -> Result<CartView> {
        Ok(CartView::new(&self.cart_service()?.items()))
    }

    /// The cart items fragment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no cart.
    pub fn cart_items(&self) -> Result<CartItemsTemplate> {
        Ok(CartItemsTemplate {
            cart: self.cart_view()?,
        })
    }

    /// The cart count badge.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no cart.
    pub fn cart_count(&self) -> Result<CartCountTemplate> {
        Ok(CartCountTemplate {
            count: self.cart_service()?.count(),
        })
    }

    /// Check out the cart. The cart panel closes on success.
    ///
    /// Without a logged-in customer the cart panel closes and the customer
    /// sidebar opens on the login form.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cart` if the cart is empty or nobody is logged in.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<CheckoutReceipt> {
        let result = self.cart_service()?.checkout();
        match result {
            Ok(receipt) => {
                self.cart_panel_mut()?.open = false;
                Ok(receipt)
            }
            Err(CartError::LoginRequired) => {
                self.cart_panel_mut()?.open = false;
                if let Some(sidebar) = self.sidebar.as_mut() {
                    sidebar.open = true;
                    sidebar.form = AuthForm::Login;
                }
                Err(CartError::LoginRequired.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    // =========================================================================
    // Carousel
    // =========================================================================

    /// The carousel.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no slides.
    pub fn carousel(&self) -> Result<&Carousel> {
        self.carousel
            .as_ref()
            .ok_or(AppError::FeatureUnavailable("Carousel"))
    }

    /// The carousel, for navigation and autoplay events.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no slides.
    pub fn carousel_mut(&mut self) -> Result<&mut Carousel> {
        self.carousel
            .as_mut()
            .ok_or(AppError::FeatureUnavailable("Carousel"))
    }

    /// The navigation dots.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no slides.
    pub fn carousel_dots(&self) -> Result<DotsTemplate> {
        Ok(DotsTemplate::from(self.carousel()?))
    }

    /// The slide track.
    ///
    /// # Errors
    ///
    /// Returns `AppError::FeatureUnavailable` if the page has no slides.
    pub fn carousel_track(&self) -> Result<CarouselTrackTemplate> {
        Ok(CarouselTrackTemplate::new(self.carousel()?, &self.page.slides))
    }
}
