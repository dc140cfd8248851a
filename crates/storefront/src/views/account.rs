//! Customer sidebar fragment.

use askama::Template;

use crate::models::Customer;

/// A customer as shown in the sidebar.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub name: String,
    /// Identifier as typed at registration.
    pub national_id: String,
    /// Normalized identifier, used to address removal.
    pub key: String,
    pub address: String,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            national_id: customer.national_id.to_string(),
            key: customer.national_id.normalized(),
            address: customer.address.clone(),
        }
    }
}

/// Which form an anonymous visitor sees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthForm {
    #[default]
    Login,
    Register,
}

impl AuthForm {
    /// The other form.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

/// What the sidebar shows.
#[derive(Debug, Clone)]
pub enum SidebarView {
    /// Dashboard for the logged-in customer plus the customer list.
    Authenticated {
        customer: CustomerView,
        customers: Vec<CustomerView>,
    },
    /// Login or registration form.
    Anonymous { form: AuthForm },
}

impl SidebarView {
    /// Build the view from the logged-in customer and the customer list.
    #[must_use]
    pub fn new(logged_in: Option<&Customer>, customers: &[Customer], form: AuthForm) -> Self {
        match logged_in {
            Some(customer) => Self::Authenticated {
                customer: CustomerView::from(customer),
                customers: customers.iter().map(CustomerView::from).collect(),
            },
            None => Self::Anonymous { form },
        }
    }

    /// Whether a customer is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// Customer sidebar template.
#[derive(Template)]
#[template(path = "account/sidebar.html")]
pub struct SidebarTemplate {
    pub open: bool,
    pub dashboard: Option<CustomerView>,
    pub customers: Vec<CustomerView>,
    pub show_register: bool,
}

impl SidebarTemplate {
    /// Flatten `view` for rendering.
    #[must_use]
    pub fn new(view: SidebarView, open: bool) -> Self {
        match view {
            SidebarView::Authenticated {
                customer,
                customers,
            } => Self {
                open,
                dashboard: Some(customer),
                customers,
                show_register: false,
            },
            SidebarView::Anonymous { form } => Self {
                open,
                dashboard: None,
                customers: Vec::new(),
                show_register: form == AuthForm::Register,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use vitrine_core::{NationalId, PasswordDigest};

    use super::*;

    fn customer(name: &str, id: &str) -> Customer {
        Customer {
            name: name.to_string(),
            national_id: NationalId::parse(id).unwrap(),
            address: "Rua A".to_string(),
            password: PasswordDigest::new("0".repeat(64)),
            created: Utc::now(),
        }
    }

    #[test]
    fn test_anonymous_shows_login_by_default() {
        let view = SidebarView::new(None, &[customer("Ana", "1")], AuthForm::default());
        assert!(!view.is_authenticated());

        let html = SidebarTemplate::new(view, true).render().unwrap();
        assert!(html.contains("id=\"loginSection\""));
        assert!(!html.contains("id=\"registerSection\""));
        assert!(!html.contains("Ana"));
    }

    #[test]
    fn test_toggle_shows_register() {
        let view = SidebarView::new(None, &[], AuthForm::Login.toggled());
        let html = SidebarTemplate::new(view, false).render().unwrap();
        assert!(html.contains("id=\"registerSection\""));
    }

    #[test]
    fn test_dashboard_lists_customers() {
        let ana = customer("Ana", "123.456.789-09");
        let bruno = customer("Bruno", "222");
        let view = SidebarView::new(Some(&ana), &[ana.clone(), bruno], AuthForm::Login);

        let html = SidebarTemplate::new(view, true).render().unwrap();
        assert!(html.contains("id=\"clientDashboard\""));
        assert!(html.contains("123.456.789-09"));
        assert!(html.contains("data-cpf=\"12345678909\""));
        assert_eq!(html.matches("class=\"cliente-item\"").count(), 2);
    }
}
