//! Live adapter for the Gemini `generateContent` API.

use reqwest::Client;

use crate::error::SpriteError;
use crate::ports::image_model::{ContentRequest, GenerateFuture, ImageModel, ModelResponse};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live Gemini image model that calls the Google AI API.
pub struct GeminiImageModel {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiImageModel {
    /// Create a new Gemini model client with the given API key.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GEMINI_API_BASE)
    }

    /// Create a client against a different API root (proxies, local mocks).
    #[must_use]
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self { client: Client::new(), api_key, base_url: base_url.into() }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{model}:generateContent", self.base_url.trim_end_matches('/'))
    }
}

/// JSON body for a `generateContent` call with a single text part.
pub(crate) fn request_body(request: &ContentRequest) -> serde_json::Value {
    serde_json::json!({
        "contents": [{
            "parts": [{"text": request.prompt}]
        }],
        "generationConfig": {
            "responseModalities": ["IMAGE", "TEXT"],
            "imageConfig": {
                "aspectRatio": request.aspect_ratio,
            }
        }
    })
}

impl ImageModel for GeminiImageModel {
    fn generate_content(&self, request: &ContentRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = self.endpoint(&request.model);
            let body = request_body(&request);

            log::debug!("POST {url} ({} prompt bytes)", request.prompt.len());

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;
            log::debug!("Gemini responded {status} ({} bytes)", response_text.len());

            if !status.is_success() {
                return Err(SpriteError::Api { status: status.as_u16(), message: response_text });
            }

            serde_json::from_str(&response_text).map_err(|e| SpriteError::Api {
                status: status.as_u16(),
                message: format!("Failed to parse response: {e}"),
            })
        })
    }
}
