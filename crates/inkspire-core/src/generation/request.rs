use serde::{Deserialize, Serialize};

use crate::error::{InkspireError, Result};
use crate::image::ImageData;
use crate::style::TattooStyle;

/// A single "generate" action. Built per call, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub description: String,
    pub style: TattooStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<ImageData>,
}

impl GenerationRequest {
    pub fn new(description: impl Into<String>, style: TattooStyle) -> Self {
        Self {
            description: description.into(),
            style,
            reference_image: None,
        }
    }

    pub fn with_reference(mut self, reference: Option<ImageData>) -> Self {
        self.reference_image = reference;
        self
    }

    /// Rejects blank descriptions before any network I/O happens.
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(InkspireError::validation("Describe the tattoo first"));
        }
        Ok(())
    }
}
