//! Upstream model abstraction.

use crate::error::Result;
use crate::image::ImageData;

/// One part of a multimodal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    Image(ImageData),
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Upstream image and text generation.
///
/// Implementations pass latency and failures through unchanged: no retries,
/// no backoff, no timeouts.
#[async_trait::async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Sends `parts` to the image model.
    ///
    /// Returns `Ok(None)` when the response carries no inline image payload;
    /// callers decide whether that is fatal.
    async fn generate_image(&self, parts: Vec<ContentPart>) -> Result<Option<ImageData>>;

    /// Sends a text prompt to the text model and returns its answer.
    async fn generate_text(&self, prompt: String) -> Result<String>;
}
