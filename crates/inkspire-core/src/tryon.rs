//! Virtual try-on overlay.
//!
//! Keeps the state of one overlay of a generated design on top of a body
//! photo and does the pointer and slider arithmetic. Compositing itself is
//! left to the renderer (CSS `mix-blend-mode` in the preview document).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InkspireError;
use crate::image::ImageData;

pub const MIN_SCALE: f64 = 5.0;
pub const MAX_SCALE: f64 = 80.0;
pub const MIN_OPACITY: f64 = 0.1;
pub const MAX_OPACITY: f64 = 1.0;

const DEFAULT_POSITION: Position = Position { x: 50.0, y: 50.0 };
const DEFAULT_SCALE: f64 = 30.0;
const DEFAULT_OPACITY: f64 = 0.8;

/// Compositing mode used to draw the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    #[default]
    Multiply,
    Normal,
    Darken,
    Overlay,
}

impl BlendMode {
    /// CSS `mix-blend-mode` keyword.
    pub fn css_value(&self) -> &'static str {
        match self {
            Self::Multiply => "multiply",
            Self::Normal => "normal",
            Self::Darken => "darken",
            Self::Overlay => "overlay",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_value())
    }
}

impl FromStr for BlendMode {
    type Err = InkspireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multiply" => Ok(Self::Multiply),
            "normal" => Ok(Self::Normal),
            "darken" => Ok(Self::Darken),
            "overlay" => Ok(Self::Overlay),
            other => Err(InkspireError::validation(format!(
                "Unknown blend mode '{other}' (expected multiply, normal, darken or overlay)"
            ))),
        }
    }
}

/// Overlay centre as a percentage of the container's width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// On-screen rectangle of the photo container, in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// State of one try-on overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryOnState {
    pub background: Option<ImageData>,
    pub position: Position,
    /// Overlay width as a percentage of the container width
    pub scale: f64,
    pub opacity: f64,
    pub blend_mode: BlendMode,
    #[serde(skip)]
    dragging: bool,
}

impl Default for TryOnState {
    fn default() -> Self {
        Self {
            background: None,
            position: DEFAULT_POSITION,
            scale: DEFAULT_SCALE,
            opacity: DEFAULT_OPACITY,
            blend_mode: BlendMode::default(),
            dragging: false,
        }
    }
}

impl TryOnState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_background(&mut self, photo: ImageData) {
        self.background = Some(photo);
    }

    /// Removes the photo and puts every control back to its default.
    pub fn clear_background(&mut self) {
        *self = Self::default();
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Pointer released or left the container.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Moves the overlay centre under the pointer while dragging.
    ///
    /// Positions are not clamped: dragging past the container edge yields
    /// values outside 0..=100, which leaves the overlay partly off-photo.
    /// Returns whether the position changed.
    pub fn drag_to(&mut self, pointer_x: f64, pointer_y: f64, rect: ContainerRect) -> bool {
        if !self.dragging || self.background.is_none() {
            return false;
        }
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return false;
        }

        self.position = Position {
            x: (pointer_x - rect.left) / rect.width * 100.0,
            y: (pointer_y - rect.top) / rect.height * 100.0,
        };
        true
    }

    /// Moves the overlay by percentage points (keyboard control).
    pub fn nudge(&mut self, dx: f64, dy: f64) {
        self.position.x += dx;
        self.position.y += dy;
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Position { x, y };
    }

    /// Slider range is 5–80 % of the container width.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Slider range is 0.1–1.0.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(MIN_OPACITY, MAX_OPACITY);
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }

    /// Self-contained page compositing `tattoo` over the loaded photo.
    ///
    /// Returns `None` when no photo is loaded.
    pub fn render_preview(&self, tattoo: &ImageData) -> Option<String> {
        let background = self.background.as_ref()?;
        Some(format!(
            r#"<html>
  <head>
    <title>Provador Virtual</title>
    <style>
      body {{ margin: 0; background: #000; }}
      .stage {{ position: relative; width: 100vw; height: 100vh; overflow: hidden; }}
      .stage > .photo {{ position: absolute; inset: 0; width: 100%; height: 100%; object-fit: cover; }}
      .overlay {{ position: absolute; left: {x}%; top: {y}%; width: {scale}%; transform: translate(-50%, -50%); opacity: {opacity}; mix-blend-mode: {blend}; }}
      .overlay > img {{ width: 100%; height: auto; }}
    </style>
  </head>
  <body>
    <div class="stage">
      <img class="photo" src="{photo}" alt="Corpo" />
      <div class="overlay"><img src="{tattoo}" alt="Sobreposição Tattoo" /></div>
    </div>
  </body>
</html>
"#,
            x = self.position.x,
            y = self.position.y,
            scale = self.scale,
            opacity = self.opacity,
            blend = self.blend_mode.css_value(),
            photo = background.to_data_url(),
            tattoo = tattoo.to_data_url(),
        ))
    }
}
