use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use inkspire_application::GenerationUseCase;
use inkspire_core::TattooStyle;
use inkspire_core::generation::GenerationRequest;
use inkspire_core::presentation::ViewMode;
use inkspire_core::result::ImageKind;
use inkspire_infrastructure::load_image;

use crate::context::AppContext;
use crate::studio::render::ResultView;

pub struct GenerateArgs {
    pub description: String,
    pub style: TattooStyle,
    pub reference: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub print: bool,
}

/// Generates one batch and writes both images of each result to disk.
pub async fn run(ctx: &AppContext, args: GenerateArgs) -> Result<()> {
    let reference = match &args.reference {
        Some(path) => Some(
            load_image(path)
                .await
                .with_context(|| format!("Failed to load reference {}", path.display()))?,
        ),
        None => None,
    };

    let usecase = GenerationUseCase::new(ctx.generation_client().await?);
    let export = ctx.export_service(args.out.as_deref());

    println!("{}", "Gerando designs...".bright_black());
    let request = GenerationRequest::new(args.description, args.style).with_reference(reference);
    let batch = usecase
        .generate(request)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    for (index, result) in batch.iter().enumerate() {
        let view = ResultView {
            position: index + 1,
            heading: result
                .view_label
                .clone()
                .unwrap_or_else(|| format!("Opção #{}", index + 1)),
            result,
            mode: ViewMode::Split,
        };
        println!("{view}");

        for kind in [ImageKind::Color, ImageKind::Stencil] {
            let path = export.save_image(result, kind).await?;
            println!("    {} {}", "saved".green(), path.display());
        }
        if args.print {
            let path = export.save_print_document(result).await?;
            println!("    {} {}", "print".green(), path.display());
        }
        println!();
    }
    Ok(())
}
