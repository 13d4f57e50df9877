//! Session and credential models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to sessions created without one.
pub const DEFAULT_DISPLAY_NAME: &str = "Artista";

/// Signed-in user, held only in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub display_name: String,
}

/// Whether the form is signing in or creating an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    Login,
    SignUp,
}

/// Data captured by the sign-in form.
///
/// The password is never stored or logged; `Debug` masks it.
#[derive(Clone, Default)]
pub struct Credentials {
    pub mode: AuthMode,
    /// Studio or artist name, only asked for on sign-up
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mode: AuthMode::Login,
            name: None,
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn sign_up(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            mode: AuthMode::SignUp,
            name: Some(name.into()),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("mode", &self.mode)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}
