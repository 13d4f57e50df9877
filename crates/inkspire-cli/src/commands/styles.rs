use colored::Colorize;
use inkspire_core::TattooStyle;

/// Lists every style with the identifier accepted by `--style` and `/style`.
pub fn run() {
    for style in TattooStyle::all() {
        let marker = if style == TattooStyle::default() { " (padrão)" } else { "" };
        println!(
            "{} {}{}",
            format!("{:<16}", style.id()).bright_cyan(),
            style.label(),
            marker.bright_black()
        );
    }
}
