//! Image model port: one prompt in, the model's raw candidates out.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::SpriteError;

/// A single content-generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRequest {
    /// The resolved model identifier (e.g., `"gemini-2.5-flash-image"`).
    pub model: String,
    /// The full text prompt; the only textual input.
    pub prompt: String,
    /// Aspect ratio hint, always `"1:1"` for sprites.
    pub aspect_ratio: String,
}

/// The model's response, kept in the shape the API returns it.
///
/// Interpretation (which part wins, what counts as a refusal) belongs to
/// the caller, not the adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResponse {
    /// Candidate answers; absent in the JSON means none.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One candidate answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content; may be missing when the model stopped early.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

/// Ordered content parts of a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Parts in the order the model produced them.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A text or inline-data part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text emitted by the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Inline binary data, still base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type of the payload (e.g., `"image/png"`).
    pub mime_type: String,
    /// Base64 payload, passed through untouched.
    pub data: String,
}

impl Part {
    /// A text-only part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), inline_data: None }
    }

    /// An inline-data part.
    #[must_use]
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData { mime_type: mime_type.into(), data: data.into() }),
        }
    }
}

impl ModelResponse {
    /// A response with a single candidate holding the given parts.
    #[must_use]
    pub fn with_parts(parts: Vec<Part>) -> Self {
        Self { candidates: vec![Candidate { content: Some(Content { parts }) }] }
    }
}

/// Boxed future type returned by [`ImageModel::generate_content`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ModelResponse, SpriteError>> + Send + 'a>>;

/// Sends a prompt to an external image model.
pub trait ImageModel: Send + Sync {
    /// Issue exactly one generation call.
    fn generate_content(&self, request: &ContentRequest) -> GenerateFuture<'_>;
}
