//! Hand-written backend double shared by the unit tests.

use std::sync::{Arc, Mutex};

use inkspire_core::ImageData;
use inkspire_core::error::{InkspireError, Result};
use inkspire_core::generation::{ContentPart, GenerationBackend};
use tokio::sync::{Notify, Semaphore};

const STENCIL_MARKER: &str = "Convert this tattoo design";

pub fn png(byte: u8) -> ImageData {
    ImageData::png(vec![byte; 4])
}

enum ColorBehavior {
    Succeed,
    /// No image for colour prompts containing the marker
    EmptyFor(&'static str),
    Upstream(u16, &'static str),
}

pub struct FakeBackend {
    color: ColorBehavior,
    text: Option<String>,
    requests: Mutex<Vec<Vec<ContentPart>>>,
    hold: Option<Semaphore>,
    started: Notify,
}

impl FakeBackend {
    fn build(color: ColorBehavior, text: Option<&str>, held: bool) -> Arc<Self> {
        Arc::new(Self {
            color,
            text: text.map(str::to_string),
            requests: Mutex::new(Vec::new()),
            hold: held.then(|| Semaphore::new(0)),
            started: Notify::new(),
        })
    }

    pub fn working(meaning: &str) -> Arc<Self> {
        Self::build(ColorBehavior::Succeed, Some(meaning), false)
    }

    /// Every request succeeds but the write-up request errors.
    pub fn working_without_text() -> Arc<Self> {
        Self::build(ColorBehavior::Succeed, None, false)
    }

    pub fn failing_color_for(marker: &'static str) -> Arc<Self> {
        Self::build(ColorBehavior::EmptyFor(marker), Some("x"), false)
    }

    pub fn upstream_error(status: u16, message: &'static str) -> Arc<Self> {
        Self::build(ColorBehavior::Upstream(status, message), Some("x"), false)
    }

    /// Image requests block until `release` is called.
    pub fn held(meaning: &str) -> Arc<Self> {
        Self::build(ColorBehavior::Succeed, Some(meaning), true)
    }

    pub async fn wait_for_request(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        if let Some(hold) = &self.hold {
            hold.add_permits(Semaphore::MAX_PERMITS / 2);
        }
    }

    pub fn requests(&self) -> Vec<Vec<ContentPart>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn image_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Last text part of every colour request.
    pub fn color_prompts(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|parts| !is_stencil(parts))
            .filter_map(|parts| match parts.last() {
                Some(ContentPart::Text(text)) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

fn is_stencil(parts: &[ContentPart]) -> bool {
    parts
        .iter()
        .any(|part| matches!(part, ContentPart::Text(t) if t.contains(STENCIL_MARKER)))
}

fn mentions(parts: &[ContentPart], marker: &str) -> bool {
    parts
        .iter()
        .any(|part| matches!(part, ContentPart::Text(t) if t.contains(marker)))
}

#[async_trait::async_trait]
impl GenerationBackend for FakeBackend {
    async fn generate_image(&self, parts: Vec<ContentPart>) -> Result<Option<ImageData>> {
        self.requests.lock().unwrap().push(parts.clone());
        self.started.notify_one();
        if let Some(hold) = &self.hold {
            let _permit = hold.acquire().await.unwrap();
        }

        if is_stencil(&parts) {
            return Ok(Some(png(2)));
        }
        match &self.color {
            ColorBehavior::Succeed => Ok(Some(png(1))),
            ColorBehavior::EmptyFor(marker) if mentions(&parts, marker) => Ok(None),
            ColorBehavior::EmptyFor(_) => Ok(Some(png(1))),
            ColorBehavior::Upstream(status, message) => {
                Err(InkspireError::upstream(Some(*status), *message))
            }
        }
    }

    async fn generate_text(&self, _prompt: String) -> Result<String> {
        self.text
            .clone()
            .ok_or_else(|| InkspireError::upstream(Some(500), "INTERNAL"))
    }
}
