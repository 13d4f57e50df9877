//! GeminiApiClient - Direct REST API implementation for Gemini.
//!
//! Implements `GenerationBackend` on top of the `generateContent` endpoint.
//! Images go to the image model, the write-up to the text model. The API key
//! comes from secret.json (or the environment, see `SecretServiceImpl`).

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use inkspire_core::config::{GeminiConfig, GenerationSettings};
use inkspire_core::error::{InkspireError, Result};
use inkspire_core::generation::{ContentPart, GenerationBackend};
use inkspire_core::image::{DEFAULT_MIME_TYPE, ImageData};
use inkspire_core::secret::SecretService;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Backend that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiClient {
    client: Client,
    api_key: String,
    image_model: String,
    text_model: String,
    base_url: String,
}

impl GeminiApiClient {
    /// Creates a client with the default models and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_settings(api_key, &GenerationSettings::default())
    }

    /// Creates a client using the models and endpoint from config.toml.
    pub fn with_settings(api_key: impl Into<String>, settings: &GenerationSettings) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            image_model: settings.image_model.clone(),
            text_model: settings.text_model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds a client from the Gemini section of secret.json.
    ///
    /// `model_name` in the secret, when present, replaces the image model.
    pub fn from_config(config: &GeminiConfig, settings: &GenerationSettings) -> Self {
        let client = Self::with_settings(config.api_key.clone(), settings);
        match &config.model_name {
            Some(model) => client.with_image_model(model.clone()),
            None => client,
        }
    }

    /// Loads the credential through a `SecretService`.
    pub async fn from_secret_service(
        service: &dyn SecretService,
        settings: &GenerationSettings,
    ) -> Result<Self> {
        let secrets = service.load_secrets().await.map_err(|e| {
            InkspireError::config(format!("Failed to load secret.json: {e}"))
        })?;

        let gemini = secrets
            .gemini
            .filter(|gemini| !gemini.api_key.trim().is_empty())
            .ok_or_else(|| {
                InkspireError::config(
                    "Gemini API key not found (set GEMINI_API_KEY or fill secret.json)",
                )
            })?;

        Ok(Self::from_config(&gemini, settings))
    }

    /// Overrides the image model after construction.
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Overrides the text model after construction.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    async fn send_request(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!("{}/{model}:generateContent", self.base_url);
        tracing::debug!(model, parts = body.contents.iter().map(|c| c.parts.len()).sum::<usize>(), "Gemini request");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                InkspireError::upstream(None, format!("Gemini API request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        response.json().await.map_err(|err| {
            InkspireError::upstream(None, format!("Failed to parse Gemini response: {err}"))
        })
    }
}

#[async_trait]
impl GenerationBackend for GeminiApiClient {
    async fn generate_image(&self, parts: Vec<ContentPart>) -> Result<Option<ImageData>> {
        let request = GenerateContentRequest::user(parts.into_iter().map(Part::from).collect());
        let response = self.send_request(&self.image_model, &request).await?;
        extract_inline_image(response)
    }

    async fn generate_text(&self, prompt: String) -> Result<String> {
        let request = GenerateContentRequest::user(vec![Part::Text { text: prompt }]);
        let response = self.send_request(&self.text_model, &request).await?;
        Ok(extract_text(response))
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    fn user(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

impl From<ContentPart> for Part {
    fn from(part: ContentPart) -> Self {
        match part {
            ContentPart::Text(text) => Part::Text { text },
            ContentPart::Image(image) => Part::InlineData {
                inline_data: InlineDataPayload {
                    data: image.to_base64(),
                    mime_type: image.mime_type,
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartResponse {
    text: Option<String>,
    inline_data: Option<InlineDataResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataResponse {
    mime_type: Option<String>,
    data: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn first_candidate_parts(response: GenerateContentResponse) -> Vec<PartResponse> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default()
}

/// First part of the first candidate that carries image data.
fn extract_inline_image(response: GenerateContentResponse) -> Result<Option<ImageData>> {
    let Some(inline) = first_candidate_parts(response)
        .into_iter()
        .filter_map(|part| part.inline_data)
        .find(|inline| inline.data.as_deref().is_some_and(|data| !data.is_empty()))
    else {
        return Ok(None);
    };

    let data = inline.data.unwrap_or_default();
    let bytes = BASE64_STANDARD.decode(data.as_bytes())?;
    let mime_type = inline
        .mime_type
        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
    Ok(Some(ImageData::new(mime_type, bytes)))
}

/// All text parts of the first candidate, concatenated. Empty when there are none.
fn extract_text(response: GenerateContentResponse) -> String {
    first_candidate_parts(response)
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .concat()
}

fn map_http_error(status: StatusCode, body: String) -> InkspireError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    InkspireError::upstream(Some(status.as_u16()), message)
}
