//! Writes results to disk: image downloads, the stencil print page and
//! try-on previews.

use inkspire_core::error::{InkspireError, Result};
use inkspire_core::presentation::{
    download_file_name, print_document, print_file_name, try_on_file_name,
};
use inkspire_core::result::{GeneratedResult, ImageKind};
use inkspire_core::tryon::TryOnState;
use std::path::{Path, PathBuf};

/// Exports generated results into one output directory.
#[derive(Debug, Clone)]
pub struct ExportService {
    dir: PathBuf,
}

impl ExportService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory from config, or the current directory.
    pub fn from_setting(directory: Option<&str>) -> Self {
        Self::new(directory.map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves the colour or stencil image as `inkspire-<kind>-<id>.png`.
    pub async fn save_image(&self, result: &GeneratedResult, kind: ImageKind) -> Result<PathBuf> {
        let path = self.dir.join(download_file_name(result, kind));
        self.write(&path, &result.image(kind).bytes).await?;
        tracing::info!(path = %path.display(), kind = kind.as_str(), "Saved image");
        Ok(path)
    }

    /// Saves the printable stencil page.
    pub async fn save_print_document(&self, result: &GeneratedResult) -> Result<PathBuf> {
        let path = self.dir.join(print_file_name(result));
        self.write(&path, print_document(result).as_bytes()).await?;
        tracing::info!(path = %path.display(), "Saved print document");
        Ok(path)
    }

    /// Saves the try-on composite of the result's colour artwork over the loaded photo.
    ///
    /// # Errors
    ///
    /// `Validation` when no photo has been loaded into `state`.
    pub async fn save_try_on_preview(
        &self,
        result: &GeneratedResult,
        state: &TryOnState,
    ) -> Result<PathBuf> {
        let html = state.render_preview(&result.color_image).ok_or_else(|| {
            InkspireError::validation("Carregue uma foto antes de gerar a prévia.")
        })?;
        let path = self.dir.join(try_on_file_name(result));
        self.write(&path, html.as_bytes()).await?;
        tracing::info!(path = %path.display(), "Saved try-on preview");
        Ok(path)
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            InkspireError::io(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| InkspireError::io(format!("Failed to write {}: {}", path.display(), e)))
    }
}
