//! Integration tests for Vitrine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_flow` - Widgets working together over one store
//! - `persistence` - Stored data format and the file-backed store
//! - `carousel_autoplay` - Autoplay driver on a paused clock
//!
//! No external services are needed. File-backed tests write under the
//! system temp directory and clean up after themselves.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use uuid::Uuid;

use vitrine_storefront::services::auth::{LoginForm, RegistrationForm};

/// A uniquely named store file under the system temp directory.
///
/// The directory is removed on drop.
pub struct TempStore {
    dir: PathBuf,
    path: PathBuf,
}

impl TempStore {
    #[must_use]
    pub fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("vitrine-it-{}", Uuid::new_v4()));
        let path = dir.join("local-storage.json");
        Self { dir, path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for TempStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempStore {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// Registration form with a fixed address.
#[must_use]
pub fn registration(name: &str, cpf: &str, password: &str) -> RegistrationForm {
    RegistrationForm {
        name: name.to_string(),
        national_id: cpf.to_string(),
        address: "Rua das Flores, 10".to_string(),
        password: SecretString::from(password.to_string()),
    }
}

/// Login form.
#[must_use]
pub fn login(cpf: &str, password: &str) -> LoginForm {
    LoginForm {
        national_id: cpf.to_string(),
        password: SecretString::from(password.to_string()),
    }
}
