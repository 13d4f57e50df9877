//! Generation use case.
//!
//! Turns one description into a batch of two results: the classifier picks
//! the two prompts, both image pairs and the symbolism write-up are requested
//! concurrently, and the batch is assembled once everything has resolved.

use chrono::Utc;
use inkspire_core::classify;
use inkspire_core::error::Result;
use inkspire_core::generation::GenerationRequest;
use inkspire_core::result::GeneratedResult;
use inkspire_interaction::GenerationClient;

/// Use case for producing one batch of designs.
///
/// # Failure policy
///
/// - Either image pair failing fails the whole batch (the first error wins).
/// - The write-up never fails the batch; `GenerationClient` substitutes a
///   placeholder text instead.
#[derive(Clone)]
pub struct GenerationUseCase {
    client: GenerationClient,
}

impl GenerationUseCase {
    pub fn new(client: GenerationClient) -> Self {
        Self { client }
    }

    /// Generates both variants for `request`.
    ///
    /// Results come back in batch order (first prompt first) and share the
    /// original prompt, style, write-up and timestamp.
    pub async fn generate(&self, request: GenerationRequest) -> Result<[GeneratedResult; 2]> {
        request.validate()?;

        let classification = classify(&request.description);
        let [(prompt_a, label_a), (prompt_b, label_b)] = classification.entries();
        let reference = request.reference_image.as_ref();

        tracing::info!(
            style = %request.style,
            paired_view = classification.is_paired_view(),
            has_reference = reference.is_some(),
            "Generating batch"
        );

        let pairs = async {
            tokio::try_join!(
                self.client.generate_pair(prompt_a, request.style, reference),
                self.client.generate_pair(prompt_b, request.style, reference),
            )
        };
        let meaning = self
            .client
            .generate_meaning(&request.description, request.style);

        let (pairs, meaning) = tokio::join!(pairs, meaning);
        let (pair_a, pair_b) = pairs.inspect_err(|e| {
            tracing::warn!(error = %e, "Batch generation failed");
        })?;

        let created_at = Utc::now();
        let batch = [
            GeneratedResult::new(
                request.description.clone(),
                request.style,
                pair_a,
                created_at,
                Some(label_a.to_string()),
                Some(meaning.clone()),
            ),
            GeneratedResult::new(
                request.description,
                request.style,
                pair_b,
                created_at,
                Some(label_b.to_string()),
                Some(meaning),
            ),
        ];

        tracing::info!(
            first = %batch[0].id,
            second = %batch[1].id,
            "Batch ready"
        );
        Ok(batch)
    }
}
