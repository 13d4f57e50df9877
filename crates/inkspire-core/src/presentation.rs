//! Presentation helpers for generated results.
//!
//! View modes, file names for downloads, the print document for stencils and
//! a plain-text rendering of the HTML symbolism write-up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InkspireError;
use crate::result::{GeneratedResult, ImageKind};

/// Which images of a result are on screen. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Color,
    Stencil,
    #[default]
    Split,
}

impl ViewMode {
    /// Images shown in this mode, left to right.
    pub fn visible_images(&self) -> &'static [ImageKind] {
        match self {
            Self::Color => &[ImageKind::Color],
            Self::Stencil => &[ImageKind::Stencil],
            Self::Split => &[ImageKind::Color, ImageKind::Stencil],
        }
    }

    pub fn shows(&self, kind: ImageKind) -> bool {
        self.visible_images().contains(&kind)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Color => "color",
            Self::Stencil => "stencil",
            Self::Split => "split",
        })
    }
}

impl FromStr for ViewMode {
    type Err = InkspireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "color" | "colour" | "cor" => Ok(Self::Color),
            "stencil" | "decalque" => Ok(Self::Stencil),
            "split" => Ok(Self::Split),
            other => Err(InkspireError::validation(format!(
                "Unknown view mode '{other}' (expected color, stencil or split)"
            ))),
        }
    }
}

/// `inkspire-<kind>-<id>.png`
pub fn download_file_name(result: &GeneratedResult, kind: ImageKind) -> String {
    format!("inkspire-{}-{}.png", kind.as_str(), result.id)
}

/// `inkspire-print-<id>.html`
pub fn print_file_name(result: &GeneratedResult) -> String {
    format!("inkspire-print-{}.html", result.id)
}

/// `inkspire-tryon-<id>.html`
pub fn try_on_file_name(result: &GeneratedResult) -> String {
    format!("inkspire-tryon-{}.html", result.id)
}

/// Minimal page that shows the stencil full-bleed and opens the print dialog.
pub fn print_document(result: &GeneratedResult) -> String {
    format!(
        r#"<html>
  <head>
    <title>Imprimir Decalque - {id}</title>
    <style>
      body {{ margin: 0; display: flex; justify-content: center; align-items: center; height: 100vh; }}
      img {{ max-width: 100%; max-height: 100vh; filter: contrast(150%); }}
    </style>
  </head>
  <body>
    <img src="{src}" />
    <script>
      window.onload = () => {{ window.print(); }}
    </script>
  </body>
</html>
"#,
        id = result.id,
        src = result.stencil_image.to_data_url(),
    )
}

/// Flattens the meaning HTML fragment to plain text for the terminal.
///
/// Paragraphs end a line and list items become `- ` bullets. Any other tag
/// is dropped. A `<` not followed by a letter or `/` is kept as text.
pub fn meaning_as_text(html: &str) -> String {
    let mut out = String::new();
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let opens_tag = rest[start + 1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/');
        if !opens_tag {
            out.push('<');
            rest = &rest[start + 1..];
            continue;
        }
        let Some(end) = rest[start..].find('>') else {
            rest = &rest[start..];
            break;
        };
        let tag = rest[start + 1..start + end]
            .trim()
            .trim_start_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_lowercase();
        let closing = rest[start + 1..].starts_with('/');
        match (tag.as_str(), closing) {
            ("li", false) => out.push_str("\n- "),
            ("p", true) | ("ul", true) => out.push('\n'),
            ("br", _) => out.push('\n'),
            _ => {}
        }
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);

    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageData;
    use crate::result::ImagePair;
    use crate::style::TattooStyle;
    use chrono::Utc;

    fn sample() -> GeneratedResult {
        GeneratedResult::new(
            "Lobo na panturrilha",
            TattooStyle::Dotwork,
            ImagePair {
                color_image: ImageData::png(vec![1, 2, 3]),
                stencil_image: ImageData::png(vec![4, 5, 6]),
            },
            Utc::now(),
            Some("Variation 1".into()),
            None,
        )
    }

    #[test]
    fn test_default_view_is_split() {
        let mode = ViewMode::default();
        assert_eq!(mode, ViewMode::Split);
        assert!(mode.shows(ImageKind::Color));
        assert!(mode.shows(ImageKind::Stencil));
        assert!(!ViewMode::Color.shows(ImageKind::Stencil));
        assert_eq!(ViewMode::Stencil.visible_images(), &[ImageKind::Stencil]);
    }

    #[test]
    fn test_parse_view_mode() {
        assert_eq!("Decalque".parse::<ViewMode>().unwrap(), ViewMode::Stencil);
        assert_eq!("colour".parse::<ViewMode>().unwrap(), ViewMode::Color);
        assert!("grid".parse::<ViewMode>().is_err());
    }

    #[test]
    fn test_download_file_names() {
        let result = sample();
        assert_eq!(
            download_file_name(&result, ImageKind::Color),
            format!("inkspire-color-{}.png", result.id)
        );
        assert_eq!(
            download_file_name(&result, ImageKind::Stencil),
            format!("inkspire-stencil-{}.png", result.id)
        );
    }

    #[test]
    fn test_print_document_embeds_stencil() {
        let result = sample();
        let html = print_document(&result);
        assert!(html.contains(&result.stencil_image.to_data_url()));
        assert!(!html.contains(&result.color_image.to_data_url()));
        assert!(html.contains("window.print()"));
        assert!(html.contains(&format!("Imprimir Decalque - {}", result.id)));
    }

    #[test]
    fn test_meaning_as_text() {
        let html = "<p><strong>Elementos Visuais:</strong> Um lobo.</p>\
                    <ul><li>Lua cheia</li><li>Pinheiros</li></ul>\
                    <p><strong>Simbolismo:</strong> Lealdade.</p>";
        let text = meaning_as_text(html);
        assert_eq!(
            text,
            "Elementos Visuais: Um lobo.\n- Lua cheia\n- Pinheiros\nSimbolismo: Lealdade."
        );
    }

    #[test]
    fn test_meaning_as_text_keeps_comparisons() {
        assert_eq!(meaning_as_text("3 < 4 e 5 > 2"), "3 < 4 e 5 > 2");
        assert_eq!(meaning_as_text("<p>1 <2</p>"), "1 <2");
        assert_eq!(meaning_as_text("fim <"), "fim <");
    }

    #[test]
    fn test_meaning_as_text_plain_input() {
        assert_eq!(meaning_as_text("Descrição indisponível."), "Descrição indisponível.");
    }
}
