//! Session domain module.
//!
//! The studio only has a mock sign-in: credentials are captured, an
//! artificial delay passes and a session is fabricated in memory.
//!
//! # Module Structure
//!
//! - `model`: Session and credential types (`Session`, `Credentials`, `AuthMode`)
//! - `gate`: The sign-in collaborator (`SessionGate`, `MockSessionGate`)

mod gate;
mod model;

// Re-export public API
pub use gate::{DEFAULT_LOGIN_DELAY, MockSessionGate, SessionGate};
pub use model::{AuthMode, Credentials, DEFAULT_DISPLAY_NAME, Session};
