//! Authentication error types.
//!
//! Display strings double as the alert text shown to the customer.

use thiserror::Error;

use vitrine_core::NationalIdError;

/// Errors that can occur during account operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A registration field was left empty.
    #[error("Please fill in all fields.")]
    MissingFields,

    /// Identifier or password missing at login.
    #[error("Please enter your identifier and password.")]
    MissingCredentials,

    /// The identifier has no digits.
    #[error("Invalid identifier: {0}.")]
    InvalidNationalId(#[from] NationalIdError),

    /// A customer with the same normalized identifier exists.
    #[error("A customer with this identifier is already registered. Please log in.")]
    AlreadyRegistered,

    /// No customer with this identifier.
    #[error("Customer not found.")]
    CustomerNotFound,

    /// Wrong password.
    #[error("Incorrect password.")]
    IncorrectPassword,
}
