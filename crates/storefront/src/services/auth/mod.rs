//! Customer account service.
//!
//! Registration, login, logout and removal against the customer list in the
//! store, plus the single "logged in" record the cart consults at checkout.

mod error;
pub mod password;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

use vitrine_core::NationalId;

use crate::error::add_breadcrumb;
use crate::models::{Customer, timestamp};
use crate::store::{KeyValueStore, ListCollection, RecordSlot, keys};
use password::Verification;

/// Registration form input.
///
/// Consumed by [`AccountService::register`]; dropping it clears the
/// password from memory.
#[derive(Debug)]
pub struct RegistrationForm {
    pub name: String,
    pub national_id: String,
    pub address: String,
    pub password: SecretString,
}

/// Login form input.
#[derive(Debug)]
pub struct LoginForm {
    pub national_id: String,
    pub password: SecretString,
}

/// Account service.
///
/// Handles customer registration, login and the customer list.
pub struct AccountService<'a, S: ?Sized> {
    customers: ListCollection<'a, S, Customer>,
    session: RecordSlot<'a, S, Customer>,
    accept_legacy_passwords: bool,
}

impl<'a, S: KeyValueStore + ?Sized> AccountService<'a, S> {
    /// Create a new account service over `store`.
    #[must_use]
    pub const fn new(store: &'a S, accept_legacy_passwords: bool) -> Self {
        Self {
            customers: ListCollection::new(store, keys::CUSTOMERS),
            session: RecordSlot::new(store, keys::LOGGED_CLIENT),
            accept_legacy_passwords,
        }
    }

    /// Register a new customer and log them in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is empty.
    /// Returns `AuthError::InvalidNationalId` if the identifier has no digits.
    /// Returns `AuthError::AlreadyRegistered` if the normalized identifier is taken.
    #[instrument(skip_all)]
    pub fn register(&self, form: RegistrationForm) -> Result<Customer, AuthError> {
        let name = form.name.trim();
        let address = form.address.trim();
        if name.is_empty()
            || form.national_id.trim().is_empty()
            || address.is_empty()
            || form.password.expose_secret().is_empty()
        {
            return Err(AuthError::MissingFields);
        }

        let national_id = NationalId::parse(&form.national_id)?;

        let mut customers = self.customers.load();
        if customers.iter().any(|c| c.is(&national_id)) {
            return Err(AuthError::AlreadyRegistered);
        }

        let customer = Customer {
            name: name.to_owned(),
            national_id,
            address: address.to_owned(),
            password: password::digest(&form.password),
            created: timestamp::now(),
        };

        customers.push(customer.clone());
        self.customers.save(&customers);
        self.session.set(Some(&customer));

        info!(total_customers = customers.len(), "Customer registered");
        add_breadcrumb("account", "Registered", None);
        Ok(customer)
    }

    /// Log in with identifier and password.
    ///
    /// A legacy base64 password is accepted only when enabled, and is
    /// replaced by its SHA-256 digest on success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is empty.
    /// Returns `AuthError::InvalidNationalId` if the identifier has no digits.
    /// Returns `AuthError::CustomerNotFound` if no customer has this identifier.
    /// Returns `AuthError::IncorrectPassword` if the password does not match.
    #[instrument(skip_all)]
    pub fn login(&self, form: LoginForm) -> Result<Customer, AuthError> {
        if form.national_id.trim().is_empty() || form.password.expose_secret().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let national_id = NationalId::parse(&form.national_id)?;

        let mut customers = self.customers.load();
        let customer = customers
            .iter_mut()
            .find(|c| c.is(&national_id))
            .ok_or(AuthError::CustomerNotFound)?;

        let upgraded = match password::verify(
            &form.password,
            &customer.password,
            self.accept_legacy_passwords,
        ) {
            Verification::Match => false,
            Verification::LegacyMatch => {
                warn!("Upgrading legacy password encoding to SHA-256");
                customer.password = password::digest(&form.password);
                true
            }
            Verification::Mismatch => return Err(AuthError::IncorrectPassword),
        };

        let customer = customer.clone();
        if upgraded {
            self.customers.save(&customers);
        }
        self.session.set(Some(&customer));

        info!("Customer logged in");
        add_breadcrumb("account", "Logged in", None);
        Ok(customer)
    }

    /// Clear the logged-in customer.
    pub fn logout(&self) {
        self.session.clear();
        info!("Customer logged out");
        add_breadcrumb("account", "Logged out", None);
    }

    /// Remove the customer registered under `national_id`.
    ///
    /// Logs the customer out if they are the one logged in. Returns the
    /// removed customer, or `None` if nobody matched.
    #[instrument(skip_all)]
    pub fn remove(&self, national_id: &NationalId) -> Option<Customer> {
        let removed = self.customers.update(|customers| {
            let position = customers.iter().position(|c| c.is(national_id))?;
            Some(customers.remove(position))
        });

        let Some(removed) = removed else {
            warn!("No customer to remove for identifier");
            return None;
        };

        if self
            .logged_in()
            .is_some_and(|logged| logged.is(&removed.national_id))
        {
            self.session.clear();
            info!("Removed customer was logged in; session cleared");
        }

        info!("Customer removed");
        Some(removed)
    }

    /// All registered customers in registration order.
    #[must_use]
    pub fn customers(&self) -> Vec<Customer> {
        self.customers.load()
    }

    /// The logged-in customer, if any.
    #[must_use]
    pub fn logged_in(&self) -> Option<Customer> {
        self.session.load()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn registration(name: &str, id: &str, password: &str) -> RegistrationForm {
        RegistrationForm {
            name: name.to_string(),
            national_id: id.to_string(),
            address: "Rua das Flores, 10".to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    fn login(id: &str, password: &str) -> LoginForm {
        LoginForm {
            national_id: id.to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    #[test]
    fn test_register_logs_in_and_stores_digest() {
        let store = MemoryStore::new();
        let accounts = AccountService::new(&store, false);

        let customer = accounts
            .register(registration("Ana", "123.456.789-09", "senha123"))
            .unwrap();

        assert_eq!(accounts.logged_in(), Some(customer.clone()));
        assert_eq!(accounts.customers(), vec![customer.clone()]);
        assert!(customer.password.is_sha256_hex());
        let raw = store.get(keys::CUSTOMERS).unwrap().unwrap();
        assert!(!raw.contains("senha123"));
    }

    #[test]
    fn test_register_requires_every_field() {
        let store = MemoryStore::new();
        let accounts = AccountService::new(&store, false);

        let mut form = registration("Ana", "123", "x");
        form.address = "   ".to_string();
        assert_eq!(accounts.register(form), Err(AuthError::MissingFields));
        assert_eq!(
            accounts.register(registration("Ana", "123", "")),
            Err(AuthError::MissingFields)
        );
        assert!(accounts.customers().is_empty());
        assert!(accounts.logged_in().is_none());
    }

    #[test]
    fn test_register_rejects_normalized_duplicate() {
        let store = MemoryStore::new();
        let accounts = AccountService::new(&store, false);

        accounts
            .register(registration("Ana", "123.456.789-09", "a"))
            .unwrap();
        let second = accounts.register(registration("Outra Ana", "12345678909", "b"));

        assert_eq!(second, Err(AuthError::AlreadyRegistered));
        assert_eq!(accounts.customers().len(), 1);
    }

    #[test]
    fn test_register_rejects_identifier_without_digits() {
        let store = MemoryStore::new();
        let accounts = AccountService::new(&store, false);

        assert!(matches!(
            accounts.register(registration("Ana", "abc", "a")),
            Err(AuthError::InvalidNationalId(_))
        ));
    }

    #[test]
    fn test_login_flows() {
        let store = MemoryStore::new();
        let accounts = AccountService::new(&store, false);
        accounts
            .register(registration("Ana", "123.456.789-09", "senha123"))
            .unwrap();
        accounts
            .register(registration("Bruno", "987.654.321-00", "outra"))
            .unwrap();
        accounts.logout();

        assert_eq!(
            accounts.login(login("", "senha123")),
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(
            accounts.login(login("111.111.111-11", "senha123")),
            Err(AuthError::CustomerNotFound)
        );
        assert_eq!(
            accounts.login(login("12345678909", "outra")),
            Err(AuthError::IncorrectPassword)
        );
        assert!(accounts.logged_in().is_none());

        let ana = accounts.login(login("123 456 789 09", "senha123")).unwrap();
        assert_eq!(ana.name, "Ana");
        assert_eq!(accounts.logged_in().map(|c| c.name), Some("Ana".to_string()));
    }

    #[test]
    fn test_legacy_password_is_upgraded_when_enabled() {
        let store = MemoryStore::with_entries([(
            keys::CUSTOMERS,
            r#"[{"nome":"Ana","cpf":"12345678909","endereco":"Rua A","password":"c2VuaGExMjM=","created":"2023-01-01T00:00:00.000Z"}]"#,
        )]);

        let strict = AccountService::new(&store, false);
        assert_eq!(
            strict.login(login("12345678909", "senha123")),
            Err(AuthError::IncorrectPassword)
        );

        let lenient = AccountService::new(&store, true);
        let customer = lenient.login(login("12345678909", "senha123")).unwrap();
        assert!(customer.password.is_sha256_hex());

        // The upgraded digest now works without legacy support.
        strict.logout();
        assert!(strict.login(login("12345678909", "senha123")).is_ok());
    }

    #[test]
    fn test_remove_logged_in_customer_clears_session() {
        let store = MemoryStore::new();
        let accounts = AccountService::new(&store, false);
        accounts.register(registration("Ana", "111", "a")).unwrap();
        accounts.register(registration("Bruno", "222", "b")).unwrap();

        // Bruno is logged in; removing Ana keeps him logged in.
        let ana = NationalId::parse("1.1.1").unwrap();
        assert!(accounts.remove(&ana).is_some());
        assert_eq!(accounts.logged_in().map(|c| c.name), Some("Bruno".to_string()));

        let bruno = NationalId::parse("222").unwrap();
        assert!(accounts.remove(&bruno).is_some());
        assert!(accounts.logged_in().is_none());
        assert!(accounts.customers().is_empty());

        assert!(accounts.remove(&bruno).is_none());
    }
}
