//! Tattoo art styles offered by the studio.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

use crate::error::InkspireError;

/// Closed set of art styles a design can be generated in.
///
/// The label is what the models see in prompts, so it stays in the studio's
/// working language.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum TattooStyle {
    #[default]
    Realism,
    Traditional,
    NeoTraditional,
    Watercolor,
    Dotwork,
    Japanese,
    FineLine,
    Blackwork,
}

impl TattooStyle {
    /// Label used in prompts and on screen.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Realism => "Realismo",
            Self::Traditional => "Old School (Tradicional)",
            Self::NeoTraditional => "Neo Tradicional",
            Self::Watercolor => "Aquarela",
            Self::Dotwork => "Pontilhismo/Geométrico",
            Self::Japanese => "Oriental (Irezumi)",
            Self::FineLine => "Fine Line (Traço Fino)",
            Self::Blackwork => "Blackwork",
        }
    }

    /// Stable identifier accepted on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Realism => "realism",
            Self::Traditional => "traditional",
            Self::NeoTraditional => "neo-traditional",
            Self::Watercolor => "watercolor",
            Self::Dotwork => "dotwork",
            Self::Japanese => "japanese",
            Self::FineLine => "fine-line",
            Self::Blackwork => "blackwork",
        }
    }

    /// All styles in display order.
    pub fn all() -> impl Iterator<Item = TattooStyle> {
        Self::iter()
    }
}

impl fmt::Display for TattooStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TattooStyle {
    type Err = InkspireError;

    /// Accepts the identifier (`fine-line`, `fine_line`) or the label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::iter()
            .find(|style| style.id() == wanted || style.label().to_lowercase() == wanted)
            .ok_or_else(|| InkspireError::validation(format!("Unknown tattoo style: '{s}'")))
    }
}
