//! Loads reference images and try-on photos from disk.

use inkspire_core::ImageData;
use inkspire_core::error::{InkspireError, Result};
use std::path::Path;

/// Reads an image file, guessing its MIME type from the extension.
///
/// # Errors
///
/// `Validation` when the extension is not an image type or the file is
/// empty, `Io` when the file cannot be read.
pub async fn load_image(path: impl AsRef<Path>) -> Result<ImageData> {
    let path = path.as_ref();
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(InkspireError::validation(format!(
            "{} não é uma imagem ({})",
            path.display(),
            mime.essence_str()
        )));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| InkspireError::io(format!("Failed to read {}: {}", path.display(), e)))?;
    if bytes.is_empty() {
        return Err(InkspireError::validation(format!(
            "{} está vazio",
            path.display()
        )));
    }

    tracing::debug!(path = %path.display(), mime = mime.essence_str(), size = bytes.len(), "Loaded image");
    Ok(ImageData::new(mime.essence_str(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_guesses_mime_from_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ref.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

        let image = load_image(&path).await.unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.len(), 3);
    }

    #[tokio::test]
    async fn test_rejects_non_image() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        assert!(load_image(&path).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_image(temp_dir.path().join("missing.png")).await.unwrap_err();
        assert!(matches!(err, InkspireError::Io { .. }));
    }
}
