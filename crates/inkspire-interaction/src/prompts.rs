//! Prompt templates.
//!
//! Templates are Jinja2 (minijinja) so the wording lives in one place and the
//! variable parts are explicit.

use inkspire_core::TattooStyle;
use inkspire_core::error::{InkspireError, Result};
use minijinja::{Environment, context};

const COLOR_PROMPT: &str = r#"Create a professional 2D TATTOO DESIGN based on this description: "{{ description }}".

Style: {{ style }}.

CRITICAL INSTRUCTIONS:
1. Output strictly the TATTOO ARTWORK/DESIGN on a SOLID WHITE background.
2. Do NOT generate a photo of a person, a model, or a body part unless specifically asked to show placement (and even then, focus on the ink).
3. ANATOMY PRECISION: If the user specifies a specific part like "Forearm" (Antebraço), do NOT generate a full sleeve. If they say "Full Arm", generate a full sleeve. Respect the boundaries of the requested body part.
4. If the input contains words like "modelo" (model), interpret it as "design template" or "motif", NOT a human fashion model.
5. No skin texture, no realistic lighting on skin. Just the graphic art.
6. High quality, clean lines, artistic masterpiece."#;

const REFERENCE_INSTRUCTION: &str = "Use the attached image as a visual reference for composition or subject, but adapt it to the requested description and style.";

const STENCIL_PROMPT: &str = "Convert this tattoo design into a precise black and white line art stencil (decalque) for a tattoo artist.
High contrast, solid white background, black lines only.
No shading, no gradients, no color.
Clean, crisp outlines suitable for thermal printing.";

const MEANING_PROMPT: &str = r#"You are an expert Tattoo Artist and Historian.
Write a short, engaging description for a tattoo design based on this request: "{{ description }}" in the style of "{{ style }}".

CRITICAL INSTRUCTION: WRITE THE ENTIRE RESPONSE IN {{ language }}.

Structure your response in HTML format (using {% for tag in allowed_tags %}<{{ tag }}>{% if not loop.last %}, {% endif %}{% endfor %} tags only) but do not wrap it in code blocks or html/body tags.

Include:
1. <strong>Elementos Visuais:</strong> Briefly describe the key visual components and characters that should appear.
2. <strong>Simbolismo:</strong> Explain the deeper meaning, cultural significance, or emotional representation of these elements.

Keep it professional, artistic, and inspiring for a client consultation. Limit to {{ word_limit }} words."#;

/// Language every write-up is requested in.
pub const MEANING_LANGUAGE: &str = "PORTUGUESE (BRAZIL)";
/// HTML tags the write-up may use.
pub const MEANING_ALLOWED_TAGS: &[&str] = &["p", "strong", "ul", "li"];
pub const MEANING_WORD_LIMIT: u32 = 150;

/// Compiled prompt templates.
pub struct PromptLibrary {
    env: Environment<'static>,
}

impl PromptLibrary {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        // Template names have no extension, so no HTML auto-escaping applies.
        for (name, source) in [("color", COLOR_PROMPT), ("meaning", MEANING_PROMPT)] {
            env.add_template(name, source).map_err(|e| {
                InkspireError::internal(format!("Invalid {name} prompt template: {e}"))
            })?;
        }
        Ok(Self { env })
    }

    /// Artwork prompt for one variant.
    pub fn color_prompt(&self, description: &str, style: TattooStyle) -> Result<String> {
        self.render(
            "color",
            context! { description => description, style => style.label() },
        )
    }

    /// Instruction that accompanies an attached reference image.
    pub fn reference_instruction(&self) -> &'static str {
        REFERENCE_INSTRUCTION
    }

    /// Line-art reduction prompt sent together with the colour artwork.
    pub fn stencil_prompt(&self) -> &'static str {
        STENCIL_PROMPT
    }

    /// Symbolism write-up prompt for the original description.
    pub fn meaning_prompt(&self, description: &str, style: TattooStyle) -> Result<String> {
        self.render(
            "meaning",
            context! {
                description => description,
                style => style.label(),
                language => MEANING_LANGUAGE,
                allowed_tags => MEANING_ALLOWED_TAGS,
                word_limit => MEANING_WORD_LIMIT,
            },
        )
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|e| InkspireError::internal(format!("Failed to render {name} prompt: {e}")))
    }
}
