//! Terminal rendering of results and try-on state.

use std::fmt;

use chrono::Local;
use colored::Colorize;
use inkspire_core::presentation::{ViewMode, meaning_as_text};
use inkspire_core::result::{GeneratedResult, ImageKind};
use inkspire_core::tryon::TryOnState;

/// One result card as text.
pub struct ResultView<'a> {
    pub position: usize,
    pub heading: String,
    pub result: &'a GeneratedResult,
    pub mode: ViewMode,
}

fn kind_label(kind: ImageKind) -> &'static str {
    match kind {
        ImageKind::Color => "Colorido",
        ImageKind::Stencil => "Decalque",
    }
}

impl fmt::Display for ResultView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        writeln!(
            f,
            "{} {}",
            format!("[{}]", self.position).bright_black(),
            self.heading.bold()
        )?;
        writeln!(
            f,
            "    {} · {}",
            result.style.label().bright_magenta(),
            result
                .created_at
                .with_timezone(&Local)
                .format("%d/%m/%Y %H:%M")
        )?;
        writeln!(f, "    {}", result.original_prompt.italic())?;

        for kind in self.mode.visible_images() {
            let image = result.image(*kind);
            let note = if *kind == ImageKind::Stencil && result.stencil_is_fallback() {
                " (cópia do colorido)"
            } else {
                ""
            };
            writeln!(
                f,
                "    {}: {}, {} bytes{}",
                kind_label(*kind),
                image.mime_type,
                image.len(),
                note.yellow()
            )?;
        }

        if let Some(meaning) = &result.meaning {
            writeln!(f)?;
            for line in meaning_as_text(meaning).lines() {
                writeln!(f, "    {}", line.bright_blue())?;
            }
        }
        Ok(())
    }
}

/// Current overlay settings.
pub fn try_on_summary(state: &TryOnState) -> String {
    let photo = match &state.background {
        Some(image) => format!("{} ({} bytes)", image.mime_type, image.len()),
        None => "nenhuma".to_string(),
    };
    format!(
        "Foto: {}\nPosição: {:.1}% x {:.1}%\nTamanho: {:.0}%\nOpacidade: {:.0}%\nMesclagem: {}",
        photo,
        state.position.x,
        state.position.y,
        state.scale,
        state.opacity * 100.0,
        state.blend_mode,
    )
}
