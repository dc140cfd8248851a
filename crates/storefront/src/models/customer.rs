//! Customer domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitrine_core::{NationalId, PasswordDigest};

/// A registered customer.
///
/// Stored under `clientes` as
/// `{"nome", "cpf", "endereco", "password", "created"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// National identifier as typed at registration.
    #[serde(rename = "cpf")]
    pub national_id: NationalId,
    /// Postal address, free-form.
    #[serde(rename = "endereco")]
    pub address: String,
    /// Password digest; never the plaintext.
    pub password: PasswordDigest,
    /// When the customer registered.
    #[serde(with = "super::timestamp")]
    pub created: DateTime<Utc>,
}

impl Customer {
    /// Whether this customer owns `id` (compared by normalized digits).
    #[must_use]
    pub fn is(&self, id: &NationalId) -> bool {
        self.national_id.same_person(id)
    }
}
