//! Studio state container.
//!
//! Everything a signed-in artist sees lives here: the session, the result
//! history, the selected style and reference image, the error banner, and the
//! per-result view mode and try-on state. All mutation goes through `Studio`
//! methods so the front end only renders.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use inkspire_core::error::{GENERIC_FAILURE_MESSAGE, InkspireError, Result};
use inkspire_core::generation::GenerationRequest;
use inkspire_core::presentation::ViewMode;
use inkspire_core::result::{GeneratedResult, ResultHistory};
use inkspire_core::session::{Credentials, Session, SessionGate};
use inkspire_core::tryon::TryOnState;
use inkspire_core::{ImageData, TattooStyle};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::generation_usecase::GenerationUseCase;

#[derive(Default)]
struct StudioState {
    session: Option<Session>,
    history: ResultHistory,
    style: TattooStyle,
    reference: Option<ImageData>,
    banner: Option<String>,
    view_modes: HashMap<Uuid, ViewMode>,
    try_on: HashMap<Uuid, TryOnState>,
}

/// Clears the busy flag when a batch ends, including on cancellation.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Single owner of the studio's in-memory state.
///
/// At most one batch is in flight at a time; a second `generate` while one
/// is running fails with `InkspireError::Busy` instead of queueing.
///
/// # Thread Safety
///
/// State sits behind a `tokio::sync::RwLock` that is never held across a
/// network call, so reads stay responsive while a batch is generating.
pub struct Studio {
    usecase: GenerationUseCase,
    gate: Arc<dyn SessionGate>,
    state: RwLock<StudioState>,
    busy: AtomicBool,
}

impl Studio {
    pub fn new(usecase: GenerationUseCase, gate: Arc<dyn SessionGate>) -> Self {
        Self {
            usecase,
            gate,
            state: RwLock::new(StudioState::default()),
            busy: AtomicBool::new(false),
        }
    }

    // ---- session ----

    pub async fn login(&self, credentials: Credentials) -> Result<Session> {
        let session = self.gate.login(credentials).await?;
        self.state.write().await.session = Some(session.clone());
        Ok(session)
    }

    /// Drops the session. Results generated so far stay in memory.
    pub async fn logout(&self) {
        self.gate.logout().await;
        let mut state = self.state.write().await;
        if let Some(session) = state.session.take() {
            tracing::info!(email = %session.email, "Signed out");
        }
    }

    pub async fn session(&self) -> Option<Session> {
        self.state.read().await.session.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.state.read().await.session.is_some()
    }

    // ---- inputs ----

    pub async fn style(&self) -> TattooStyle {
        self.state.read().await.style
    }

    pub async fn set_style(&self, style: TattooStyle) {
        self.state.write().await.style = style;
    }

    pub async fn reference(&self) -> Option<ImageData> {
        self.state.read().await.reference.clone()
    }

    /// Attaches or (with `None`) clears the reference image for later batches.
    pub async fn set_reference(&self, reference: Option<ImageData>) {
        self.state.write().await.reference = reference;
    }

    // ---- generation ----

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Message of the last failed batch, if it hasn't been replaced yet.
    pub async fn banner(&self) -> Option<String> {
        self.state.read().await.banner.clone()
    }

    pub async fn dismiss_banner(&self) {
        self.state.write().await.banner = None;
    }

    /// Generates a batch for `description` with the current style and
    /// reference, and puts it at the front of the history.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated`: nobody is signed in
    /// - `Busy`: another batch is still running
    /// - `Validation`: blank description (no banner, nothing is sent)
    /// - any generation error, which also replaces the banner
    pub async fn generate(&self, description: &str) -> Result<[GeneratedResult; 2]> {
        let request = {
            let state = self.state.read().await;
            if state.session.is_none() {
                return Err(InkspireError::Unauthenticated);
            }
            GenerationRequest::new(description, state.style)
                .with_reference(state.reference.clone())
        };
        request.validate()?;

        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(InkspireError::Busy);
        }
        let _guard = BusyGuard(&self.busy);
        self.state.write().await.banner = None;

        match self.usecase.generate(request).await {
            Ok(batch) => {
                self.state.write().await.history.prepend_batch(batch.clone());
                Ok(batch)
            }
            Err(e) => {
                let message = e.user_message();
                self.state.write().await.banner = Some(if message.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    message
                });
                Err(e)
            }
        }
    }

    // ---- results ----

    pub async fn history(&self) -> ResultHistory {
        self.state.read().await.history.clone()
    }

    /// Result at 1-based `position`, newest first.
    pub async fn result_at(&self, position: usize) -> Result<GeneratedResult> {
        self.state
            .read()
            .await
            .history
            .at_position(position)
            .cloned()
            .ok_or_else(|| InkspireError::not_found("Result", position.to_string()))
    }

    pub async fn view_mode(&self, id: &Uuid) -> ViewMode {
        self.state
            .read()
            .await
            .view_modes
            .get(id)
            .copied()
            .unwrap_or_default()
    }

    pub async fn set_view_mode(&self, id: &Uuid, mode: ViewMode) -> Result<()> {
        let mut state = self.state.write().await;
        if state.history.find(id).is_none() {
            return Err(InkspireError::not_found("Result", id.to_string()));
        }
        state.view_modes.insert(*id, mode);
        Ok(())
    }

    // ---- try-on ----

    /// Snapshot of the try-on state of result `id` (defaults if never opened).
    pub async fn try_on(&self, id: &Uuid) -> TryOnState {
        self.state
            .read()
            .await
            .try_on
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    /// Runs `f` against the try-on state of result `id`.
    ///
    /// Each result has its own independent try-on state.
    pub async fn update_try_on<R>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut TryOnState) -> R,
    ) -> Result<R> {
        let mut state = self.state.write().await;
        if state.history.find(id).is_none() {
            return Err(InkspireError::not_found("Result", id.to_string()));
        }
        Ok(f(state.try_on.entry(*id).or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeBackend;
    use inkspire_core::session::MockSessionGate;
    use inkspire_core::tryon::BlendMode;
    use inkspire_interaction::GenerationClient;
    use std::time::Duration;

    fn studio(backend: Arc<FakeBackend>) -> Studio {
        let client = GenerationClient::new(backend).unwrap();
        Studio::new(
            GenerationUseCase::new(client),
            Arc::new(MockSessionGate::new(Duration::ZERO)),
        )
    }

    async fn signed_in(backend: Arc<FakeBackend>) -> Studio {
        let studio = studio(backend);
        studio
            .login(Credentials::login("ink@studio.com", "pw"))
            .await
            .unwrap();
        studio
    }

    #[tokio::test]
    async fn test_generate_requires_session() {
        let backend = FakeBackend::working("x");
        let studio = studio(backend.clone());

        let err = studio.generate("Lobo").await.unwrap_err();
        assert!(matches!(err, InkspireError::Unauthenticated));
        assert_eq!(backend.image_calls(), 0);
        assert!(studio.banner().await.is_none());
    }

    #[tokio::test]
    async fn test_batches_are_prepended() {
        let studio = signed_in(FakeBackend::working("x")).await;

        let first = studio.generate("Lobo").await.unwrap();
        let second = studio.generate("Rosa").await.unwrap();

        let history = studio.history().await;
        let ids: Vec<Uuid> = history.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second[0].id, second[1].id, first[0].id, first[1].id]);
        assert_eq!(studio.result_at(3).await.unwrap().id, first[0].id);
        assert!(studio.result_at(5).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_style_and_reference_are_used() {
        let backend = FakeBackend::working("x");
        let studio = signed_in(backend.clone()).await;
        studio.set_style(TattooStyle::FineLine).await;
        studio
            .set_reference(Some(ImageData::new("image/jpeg", vec![3])))
            .await;

        let batch = studio.generate("Lobo").await.unwrap();
        assert_eq!(batch[0].style, TattooStyle::FineLine);
        assert!(backend.color_prompts().iter().all(|p| p.contains("Fine Line")));

        studio.set_reference(None).await;
        assert!(studio.reference().await.is_none());
    }

    #[tokio::test]
    async fn test_failure_sets_banner_and_keeps_history() {
        let studio = signed_in(FakeBackend::failing_color_for("Variation 1")).await;

        let err = studio.generate("Lobo").await.unwrap_err();
        assert!(err.is_generation());
        assert_eq!(
            studio.banner().await.as_deref(),
            Some("Falha ao gerar o design da tatuagem.")
        );
        assert!(studio.history().await.is_empty());
        assert!(!studio.is_busy());
    }

    #[tokio::test]
    async fn test_upstream_failure_gets_its_message() {
        let studio = signed_in(FakeBackend::upstream_error(503, "The model is overloaded.")).await;

        studio.generate("Lobo").await.unwrap_err();
        let banner = studio.banner().await.unwrap();
        assert!(banner.contains("The model is overloaded."));
    }

    #[tokio::test]
    async fn test_blank_description_leaves_banner_alone() {
        let studio = signed_in(FakeBackend::failing_color_for("Variation 1")).await;
        studio.generate("Lobo").await.unwrap_err();

        let err = studio.generate("   ").await.unwrap_err();
        assert!(err.is_validation());
        assert!(studio.banner().await.is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_second_generate_while_busy_is_rejected() {
        let backend = FakeBackend::held("x");
        let studio = Arc::new(signed_in(backend.clone()).await);

        let running = {
            let studio = Arc::clone(&studio);
            tokio::spawn(async move { studio.generate("Lobo").await })
        };
        backend.wait_for_request().await;
        assert!(studio.is_busy());

        let err = studio.generate("Rosa").await.unwrap_err();
        assert!(matches!(err, InkspireError::Busy));

        backend.release();
        running.await.unwrap().unwrap();
        assert!(!studio.is_busy());
        assert_eq!(studio.history().await.len(), 2);
    }

    #[tokio::test]
    async fn test_logout_keeps_history() {
        let studio = signed_in(FakeBackend::working("x")).await;
        studio.generate("Lobo").await.unwrap();

        studio.logout().await;
        assert!(!studio.is_signed_in().await);
        assert_eq!(studio.history().await.len(), 2);
        assert!(matches!(
            studio.generate("Lobo").await.unwrap_err(),
            InkspireError::Unauthenticated
        ));
    }

    #[tokio::test]
    async fn test_view_mode_and_try_on_are_per_result() {
        let studio = signed_in(FakeBackend::working("x")).await;
        let batch = studio.generate("Lobo").await.unwrap();
        let (a, b) = (batch[0].id, batch[1].id);

        assert_eq!(studio.view_mode(&a).await, ViewMode::Split);
        studio.set_view_mode(&a, ViewMode::Stencil).await.unwrap();
        assert_eq!(studio.view_mode(&a).await, ViewMode::Stencil);
        assert_eq!(studio.view_mode(&b).await, ViewMode::Split);

        studio
            .update_try_on(&a, |t| {
                t.set_scale(500.0);
                t.set_blend_mode(BlendMode::Darken);
            })
            .await
            .unwrap();
        assert_eq!(studio.try_on(&a).await.scale, 80.0);
        assert_eq!(studio.try_on(&b).await.blend_mode, BlendMode::Multiply);

        let unknown = Uuid::new_v4();
        assert!(studio.set_view_mode(&unknown, ViewMode::Color).await.is_err());
        assert!(studio.update_try_on(&unknown, |_| ()).await.is_err());
    }
}
