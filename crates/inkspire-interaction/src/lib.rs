//! Talking to the generative models.
//!
//! - `prompts`: Jinja templates for every request the studio sends
//! - `generation_client`: colour → stencil chain and the symbolism write-up
//! - `gemini_api_client`: REST implementation of `GenerationBackend`

pub mod gemini_api_client;
pub mod generation_client;
pub mod prompts;

pub use gemini_api_client::GeminiApiClient;
pub use generation_client::{GenerationClient, MEANING_FAILED_PLACEHOLDER, MEANING_EMPTY_PLACEHOLDER};
pub use prompts::PromptLibrary;
