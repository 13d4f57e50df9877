//! GeneratedResult domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::image::ImageData;
use crate::style::TattooStyle;

/// Colour artwork plus the stencil derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePair {
    pub color_image: ImageData,
    pub stencil_image: ImageData,
}

impl ImagePair {
    /// True when the stencil step fell back to the colour image.
    pub fn stencil_is_fallback(&self) -> bool {
        self.stencil_image == self.color_image
    }
}

/// Which of the two images of a result an action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Color,
    Stencil,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Stencil => "stencil",
        }
    }
}

/// One generated design.
///
/// Created once both the image pair and the symbolism text have resolved and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResult {
    pub id: Uuid,
    pub original_prompt: String,
    pub style: TattooStyle,
    pub color_image: ImageData,
    pub stencil_image: ImageData,
    pub created_at: DateTime<Utc>,
    /// e.g. "External Side (Forearm)"
    pub view_label: Option<String>,
    /// HTML fragment describing elements and symbolism
    pub meaning: Option<String>,
}

impl GeneratedResult {
    pub fn new(
        original_prompt: impl Into<String>,
        style: TattooStyle,
        pair: ImagePair,
        created_at: DateTime<Utc>,
        view_label: Option<String>,
        meaning: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_prompt: original_prompt.into(),
            style,
            color_image: pair.color_image,
            stencil_image: pair.stencil_image,
            created_at,
            view_label,
            meaning,
        }
    }

    pub fn image(&self, kind: ImageKind) -> &ImageData {
        match kind {
            ImageKind::Color => &self.color_image,
            ImageKind::Stencil => &self.stencil_image,
        }
    }

    /// True when no separate stencil could be produced.
    pub fn stencil_is_fallback(&self) -> bool {
        self.stencil_image == self.color_image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_result_gets_unique_id() {
        let pair = ImagePair {
            color_image: ImageData::png(vec![1]),
            stencil_image: ImageData::png(vec![2]),
        };
        let a = GeneratedResult::new("wolf", TattooStyle::Blackwork, pair.clone(), Utc::now(), None, None);
        let b = GeneratedResult::new("wolf", TattooStyle::Blackwork, pair, Utc::now(), None, None);
        assert_ne!(a.id, b.id);
        assert_eq!(a.image(ImageKind::Stencil).bytes, vec![2]);
    }

    #[test]
    fn test_stencil_fallback_detection() {
        let color = ImageData::png(vec![9, 9]);
        let pair = ImagePair {
            color_image: color.clone(),
            stencil_image: color,
        };
        assert!(pair.stencil_is_fallback());
    }
}
