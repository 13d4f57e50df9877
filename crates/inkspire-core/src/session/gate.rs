//! Sign-in collaborator.

use std::time::Duration;

use super::model::{AuthMode, Credentials, DEFAULT_DISPLAY_NAME, Session};
use crate::error::{InkspireError, Result};

/// Artificial delay before the mock gate grants a session.
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1500);

/// Grants and revokes sessions.
///
/// This trait abstracts sign-in so that a real identity provider could
/// replace the mock without touching the studio.
#[async_trait::async_trait]
pub trait SessionGate: Send + Sync {
    /// Validates the form and returns a session.
    async fn login(&self, credentials: Credentials) -> Result<Session>;

    /// Forgets whatever the gate holds for the current session.
    async fn logout(&self);
}

/// Mock gate: no real authentication, no password check, no persistence.
///
/// # Example
///
/// ```
/// use inkspire_core::session::{Credentials, MockSessionGate, SessionGate};
/// use std::time::Duration;
///
/// # tokio_test_block_on(async {
/// let gate = MockSessionGate::new(Duration::ZERO);
/// let session = gate.login(Credentials::login("ink@studio.com", "secret")).await.unwrap();
/// assert_eq!(session.display_name, "Artista");
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockSessionGate {
    delay: Duration,
}

impl MockSessionGate {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    fn validate(credentials: &Credentials) -> Result<()> {
        if credentials.email.trim().is_empty() {
            return Err(InkspireError::validation("E-mail is required"));
        }
        if credentials.password.is_empty() {
            return Err(InkspireError::validation("Password is required"));
        }
        let has_name = credentials
            .name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty());
        if credentials.mode == AuthMode::SignUp && !has_name {
            return Err(InkspireError::validation(
                "Studio or artist name is required to sign up",
            ));
        }
        Ok(())
    }
}

impl Default for MockSessionGate {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_DELAY)
    }
}

#[async_trait::async_trait]
impl SessionGate for MockSessionGate {
    async fn login(&self, credentials: Credentials) -> Result<Session> {
        Self::validate(&credentials)?;

        tokio::time::sleep(self.delay).await;

        let display_name = credentials
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

        tracing::info!(email = %credentials.email, mode = ?credentials.mode, "Session granted");

        Ok(Session {
            email: credentials.email.trim().to_string(),
            display_name,
        })
    }

    async fn logout(&self) {
        tracing::info!("Session closed");
    }
}
