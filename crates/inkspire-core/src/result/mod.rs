//! Generated results and the in-memory history they are kept in.
//!
//! # Module Structure
//!
//! - `model`: A single generated design (`GeneratedResult`)
//! - `history`: Newest-first list of results (`ResultHistory`)

mod history;
mod model;

// Re-export public API
pub use history::ResultHistory;
pub use model::{GeneratedResult, ImageKind, ImagePair};
