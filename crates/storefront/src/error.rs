//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for every storefront operation. Errors
//! fall into two groups:
//!
//! - **User-facing**: validation failures (empty fields, duplicate customer,
//!   wrong password, empty cart at checkout). The adapter shows
//!   [`AppError::user_message`] as a blocking alert; nothing was changed.
//! - **Internal**: storage and rendering failures. These are logged and
//!   captured to Sentry, and the user only sees a generic message.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::services::reviews::ReviewError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Account operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Review submission failed.
    #[error("Review error: {0}")]
    Review(#[from] ReviewError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A view template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// The requested widget is not present on this page.
    #[error("Feature not available: {0}")]
    FeatureUnavailable(&'static str),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error is a validation failure the user should see.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Auth(_) | Self::Cart(_) | Self::Review(_) | Self::FeatureUnavailable(_)
        )
    }

    /// Alert text to show the user.
    ///
    /// Internal details are never exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(err) => err.to_string(),
            Self::Cart(err) => err.to_string(),
            Self::Review(err) => err.to_string(),
            Self::FeatureUnavailable(feature) => format!("{feature} is not available on this page."),
            Self::Store(_) | Self::Config(_) | Self::Template(_) | Self::Internal(_) => {
                "Something went wrong, please try again.".to_string()
            }
        }
    }

    /// Log and capture internal errors; validation failures are only traced.
    pub fn report(&self) {
        if self.is_user_facing() {
            tracing::debug!(error = %self, "Validation failure");
        } else {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Log a swallowed internal failure and capture it to Sentry.
///
/// Used where the storefront degrades to a default instead of failing, such
/// as reading a corrupt list as empty.
pub fn report_internal<E>(err: &E, key: &str, message: &str)
where
    E: std::error::Error + ?Sized,
{
    let event_id = sentry::capture_error(err);
    tracing::error!(
        error = %err,
        key,
        sentry_event_id = %event_id,
        "{message}"
    );
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added product", Some(&[("product_id", "p1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
