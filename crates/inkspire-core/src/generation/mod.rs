//! Generation seam.
//!
//! # Module Structure
//!
//! - `backend`: The trait every upstream model provider implements (`GenerationBackend`)
//! - `request`: What the user asks for (`GenerationRequest`)

mod backend;
mod request;

// Re-export public API
pub use backend::{ContentPart, GenerationBackend};
pub use request::GenerationRequest;
