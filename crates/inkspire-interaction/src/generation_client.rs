//! Generation client.
//!
//! Drives a `GenerationBackend` through the two requests of an image pair
//! (colour artwork, then the stencil derived from it) and the separate
//! symbolism write-up. Owns the failure policy of each step:
//!
//! - colour step without an image: hard `Generation` error
//! - stencil step without an image, or failing: stencil = colour, warning only
//! - write-up failing: fixed placeholder text, never an error

use std::sync::Arc;

use inkspire_core::error::{InkspireError, Result};
use inkspire_core::generation::{ContentPart, GenerationBackend};
use inkspire_core::result::ImagePair;
use inkspire_core::{ImageData, TattooStyle};

use crate::prompts::PromptLibrary;

/// Returned when the write-up request fails.
pub const MEANING_FAILED_PLACEHOLDER: &str =
    "Não foi possível gerar a análise simbólica no momento.";
/// Returned when the write-up request succeeds with no text.
pub const MEANING_EMPTY_PLACEHOLDER: &str = "Descrição indisponível.";
/// Error message when the colour step yields no artwork.
pub const COLOR_FAILED_MESSAGE: &str = "Falha ao gerar o design da tatuagem.";

/// High-level generation operations over any backend.
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
    prompts: Arc<PromptLibrary>,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Result<Self> {
        Ok(Self {
            backend,
            prompts: Arc::new(PromptLibrary::new()?),
        })
    }

    /// Colour artwork for `prompt`, plus its stencil.
    ///
    /// # Errors
    ///
    /// Returns `InkspireError::Generation` when the colour step returns no
    /// image, and propagates backend errors of the colour step. Stencil
    /// failures never surface; the colour image is reused instead.
    pub async fn generate_pair(
        &self,
        prompt: &str,
        style: TattooStyle,
        reference: Option<&ImageData>,
    ) -> Result<ImagePair> {
        let mut parts = Vec::new();
        if let Some(reference) = reference {
            parts.push(ContentPart::Image(reference.clone()));
            parts.push(ContentPart::text(self.prompts.reference_instruction()));
        }
        parts.push(ContentPart::Text(self.prompts.color_prompt(prompt, style)?));

        tracing::debug!(style = %style, has_reference = reference.is_some(), "Requesting colour artwork");

        let color_image = self
            .backend
            .generate_image(parts)
            .await?
            .filter(|image| !image.is_empty())
            .ok_or_else(|| InkspireError::generation(COLOR_FAILED_MESSAGE))?;

        let stencil_image = self.derive_stencil(&color_image).await;

        Ok(ImagePair {
            color_image,
            stencil_image,
        })
    }

    async fn derive_stencil(&self, color_image: &ImageData) -> ImageData {
        let parts = vec![
            ContentPart::Image(color_image.clone()),
            ContentPart::text(self.prompts.stencil_prompt()),
        ];

        match self.backend.generate_image(parts).await {
            Ok(Some(stencil)) if !stencil.is_empty() => stencil,
            Ok(_) => {
                tracing::warn!("Stencil generation returned no image, reusing colour artwork");
                color_image.clone()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stencil generation failed, reusing colour artwork");
                color_image.clone()
            }
        }
    }

    /// Short HTML write-up on the elements and symbolism of `description`.
    ///
    /// Never fails: the write-up is decorative and must not block a batch.
    pub async fn generate_meaning(&self, description: &str, style: TattooStyle) -> String {
        let prompt = match self.prompts.meaning_prompt(description, style) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!(error = %e, "Meaning prompt could not be built");
                return MEANING_FAILED_PLACEHOLDER.to_string();
            }
        };

        match self.backend.generate_text(prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => MEANING_EMPTY_PLACEHOLDER.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Meaning generation failed");
                MEANING_FAILED_PLACEHOLDER.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    type ImageReply = Result<Option<ImageData>>;

    // Scripted backend: pops one reply per image request and records the parts it saw
    struct ScriptedBackend {
        image_replies: Mutex<VecDeque<ImageReply>>,
        text_reply: Mutex<Option<Result<String>>>,
        seen: Mutex<Vec<Vec<ContentPart>>>,
    }

    impl ScriptedBackend {
        fn new(image_replies: Vec<ImageReply>, text_reply: Result<String>) -> Arc<Self> {
            Arc::new(Self {
                image_replies: Mutex::new(image_replies.into()),
                text_reply: Mutex::new(Some(text_reply)),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl GenerationBackend for ScriptedBackend {
        async fn generate_image(&self, parts: Vec<ContentPart>) -> Result<Option<ImageData>> {
            self.seen.lock().unwrap().push(parts);
            self.image_replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(None))
        }

        async fn generate_text(&self, _prompt: String) -> Result<String> {
            self.text_reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    fn png(byte: u8) -> ImageData {
        ImageData::png(vec![byte; 8])
    }

    // Records the level of every event emitted while installed as the default subscriber
    #[derive(Clone, Default)]
    struct LevelRecorder(Arc<Mutex<Vec<tracing::Level>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LevelRecorder {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    impl LevelRecorder {
        fn levels(&self) -> Vec<tracing::Level> {
            self.0.lock().unwrap().clone()
        }
    }

    fn record_levels() -> (LevelRecorder, tracing::subscriber::DefaultGuard) {
        use tracing_subscriber::layer::SubscriberExt;

        let recorder = LevelRecorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());
        (recorder, tracing::subscriber::set_default(subscriber))
    }

    #[tokio::test]
    async fn test_pair_with_stencil() {
        let backend = ScriptedBackend::new(vec![Ok(Some(png(1))), Ok(Some(png(2)))], Ok("x".into()));
        let client = GenerationClient::new(backend.clone()).unwrap();

        let pair = client
            .generate_pair("Lobo", TattooStyle::Realism, None)
            .await
            .unwrap();

        assert_eq!(pair.color_image, png(1));
        assert_eq!(pair.stencil_image, png(2));

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        // stencil request feeds the colour artwork back in
        assert_eq!(seen[1][0], ContentPart::Image(png(1)));
    }

    #[tokio::test]
    async fn test_missing_stencil_falls_back_to_color_with_warning() {
        let (recorder, _guard) = record_levels();
        let backend = ScriptedBackend::new(vec![Ok(Some(png(1))), Ok(None)], Ok("x".into()));
        let client = GenerationClient::new(backend).unwrap();

        let pair = client
            .generate_pair("Lobo", TattooStyle::Realism, None)
            .await
            .unwrap();

        assert_eq!(pair.stencil_image.bytes, pair.color_image.bytes);
        assert!(pair.stencil_is_fallback());

        let levels = recorder.levels();
        assert!(levels.contains(&tracing::Level::WARN));
        assert!(!levels.contains(&tracing::Level::ERROR));
    }

    #[tokio::test]
    async fn test_failing_stencil_falls_back_to_color() {
        let backend = ScriptedBackend::new(
            vec![
                Ok(Some(png(1))),
                Err(InkspireError::upstream(Some(500), "INTERNAL")),
            ],
            Ok("x".into()),
        );
        let client = GenerationClient::new(backend).unwrap();
        let (recorder, _guard) = record_levels();

        let pair = client
            .generate_pair("Lobo", TattooStyle::Realism, None)
            .await
            .unwrap();
        assert!(pair.stencil_is_fallback());
        assert!(recorder.levels().contains(&tracing::Level::WARN));
    }

    #[tokio::test]
    async fn test_missing_color_is_generation_error() {
        let backend = ScriptedBackend::new(vec![Ok(None)], Ok("x".into()));
        let client = GenerationClient::new(backend.clone()).unwrap();

        let err = client
            .generate_pair("Lobo", TattooStyle::Realism, None)
            .await
            .unwrap_err();

        assert!(err.is_generation());
        assert_eq!(err.user_message(), COLOR_FAILED_MESSAGE);
        // no stencil request after a failed colour step
        assert_eq!(backend.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reference_image_goes_first() {
        let backend = ScriptedBackend::new(vec![Ok(Some(png(1))), Ok(Some(png(2)))], Ok("x".into()));
        let client = GenerationClient::new(backend.clone()).unwrap();
        let reference = ImageData::new("image/jpeg", vec![5, 5]);

        client
            .generate_pair("Lobo", TattooStyle::Watercolor, Some(&reference))
            .await
            .unwrap();

        let seen = backend.seen.lock().unwrap();
        let color_parts = &seen[0];
        assert_eq!(color_parts.len(), 3);
        assert_eq!(color_parts[0], ContentPart::Image(reference));
        assert!(matches!(&color_parts[1], ContentPart::Text(t) if t.contains("visual reference")));
        assert!(matches!(&color_parts[2], ContentPart::Text(t) if t.contains("Aquarela")));
    }

    #[tokio::test]
    async fn test_meaning_failure_gives_placeholder() {
        let backend = ScriptedBackend::new(vec![], Err(InkspireError::upstream(None, "offline")));
        let client = GenerationClient::new(backend).unwrap();

        let meaning = client.generate_meaning("Lobo", TattooStyle::Realism).await;
        assert_eq!(meaning, MEANING_FAILED_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_meaning_empty_gives_unavailable() {
        let backend = ScriptedBackend::new(vec![], Ok("   ".into()));
        let client = GenerationClient::new(backend).unwrap();

        let meaning = client.generate_meaning("Lobo", TattooStyle::Realism).await;
        assert_eq!(meaning, MEANING_EMPTY_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_meaning_text_is_passed_through() {
        let backend = ScriptedBackend::new(vec![], Ok("<p>Lealdade</p>".into()));
        let client = GenerationClient::new(backend).unwrap();

        let meaning = client.generate_meaning("Lobo", TattooStyle::Realism).await;
        assert_eq!(meaning, "<p>Lealdade</p>");
    }
}
