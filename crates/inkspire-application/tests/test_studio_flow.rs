use std::sync::Arc;
use std::time::Duration;

use inkspire_application::{GenerationUseCase, Studio};
use inkspire_core::error::Result;
use inkspire_core::generation::{ContentPart, GenerationBackend};
use inkspire_core::session::{Credentials, MockSessionGate};
use inkspire_core::ImageData;
use inkspire_interaction::GenerationClient;

/// Answers every image request with a one-pixel PNG and every text request
/// with a fixed write-up.
struct StaticBackend;

#[async_trait::async_trait]
impl GenerationBackend for StaticBackend {
    async fn generate_image(&self, _parts: Vec<ContentPart>) -> Result<Option<ImageData>> {
        Ok(Some(ImageData::png(vec![0x89, 0x50, 0x4E, 0x47])))
    }

    async fn generate_text(&self, _prompt: String) -> Result<String> {
        Ok("<p><strong>Simbolismo:</strong> proteção</p>".to_string())
    }
}

fn studio() -> Studio {
    let client = GenerationClient::new(Arc::new(StaticBackend)).unwrap();
    Studio::new(
        GenerationUseCase::new(client),
        Arc::new(MockSessionGate::default()),
    )
}

#[tokio::test(start_paused = true)]
async fn test_sign_up_then_generate() {
    let studio = studio();

    let started = tokio::time::Instant::now();
    let session = studio
        .login(Credentials::sign_up("Estúdio Agulha", "ink@studio.com", "pw"))
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(1500));
    assert_eq!(session.display_name, "Estúdio Agulha");

    studio.generate("Manga completa de braço, dragão").await.unwrap();
    studio.generate("Rosa no peito").await.unwrap();

    let history = studio.history().await;
    assert_eq!(history.len(), 4);
    assert_eq!(history.heading_at(1).as_deref(), Some("Variation 1"));
    assert_eq!(
        history.heading_at(3).as_deref(),
        Some("External Side (Full Arm)")
    );
    assert_eq!(
        history.heading_at(4).as_deref(),
        Some("Internal Side (Full Arm)")
    );
}

#[tokio::test(start_paused = true)]
async fn test_invalid_login_keeps_studio_locked() {
    let studio = studio();

    let err = studio
        .login(Credentials::login("   ", "pw"))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(studio.session().await.is_none());
}
