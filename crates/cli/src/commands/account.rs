//! `vitrine account ...`

use secrecy::SecretString;

use vitrine_core::NationalId;
use vitrine_storefront::services::auth::{LoginForm, RegistrationForm};
use vitrine_storefront::store::JsonFileStore;
use vitrine_storefront::{AppError, Result, Storefront};

use crate::output;

type Shop = Storefront<JsonFileStore>;

/// Print the sidebar in its open state.
pub fn show(storefront: &mut Shop) -> Result<()> {
    output::html(&storefront.open_sidebar()?)?;
    Ok(())
}

pub fn register(
    storefront: &mut Shop,
    name: String,
    cpf: String,
    address: String,
    password: String,
) -> Result<()> {
    let customer = storefront.register(RegistrationForm {
        name,
        national_id: cpf,
        address,
        password: SecretString::from(password),
    })?;
    output::alert(&format!("Registered and logged in as {}.", customer.name));
    show(storefront)
}

pub fn login(storefront: &mut Shop, cpf: String, password: String) -> Result<()> {
    let customer = storefront.login(LoginForm {
        national_id: cpf,
        password: SecretString::from(password),
    })?;
    output::alert(&format!("Welcome back, {}.", customer.name));
    show(storefront)
}

pub fn logout(storefront: &mut Shop) -> Result<()> {
    storefront.logout()?;
    show(storefront)
}

pub fn remove(storefront: &mut Shop, cpf: &str) -> Result<()> {
    let national_id = NationalId::parse(cpf).map_err(|e| AppError::Auth(e.into()))?;
    if storefront.remove_customer(&national_id)?.is_none() {
        output::alert("No customer with this identifier.");
    }
    show(storefront)
}

/// Show the registration form (or back to login).
///
/// The choice only lasts for this invocation.
pub fn toggle(storefront: &mut Shop) -> Result<()> {
    storefront.toggle_auth_form()?;
    show(storefront)
}
