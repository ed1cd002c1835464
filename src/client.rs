//! Generation client: prompt in, image data URI out.

use std::fmt;

use base64::Engine;

use crate::error::SpriteError;
use crate::options::GenerationOptions;
use crate::ports::image_model::{ContentRequest, ImageModel, ModelResponse};
use crate::prompt::build_prompt;

/// Sprites are always requested square.
pub const SPRITE_ASPECT_RATIO: &str = "1:1";

/// An image encoded as `data:<mime>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDataUri {
    mime_type: String,
    data: String,
}

impl ImageDataUri {
    /// Wrap an already base64-encoded payload. The payload is not re-encoded
    /// or validated.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self { mime_type: mime_type.into(), data: data.into() }
    }

    /// MIME type of the payload.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Decode the payload into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Decode`] if the payload is not valid base64.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, SpriteError> {
        base64::engine::general_purpose::STANDARD
            .decode(self.data.trim())
            .map_err(|e| SpriteError::Decode(format!("Failed to decode base64: {e}")))
    }
}

impl fmt::Display for ImageDataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

/// The outcome of one generation request.
pub type GenerationResult = Result<ImageDataUri, SpriteError>;

/// Turns generation options into a sprite image through an [`ImageModel`].
pub struct SpriteClient {
    model: Box<dyn ImageModel>,
    model_id: String,
}

impl SpriteClient {
    /// Create a client that sends requests for `model_id` through `model`.
    pub fn new(model: Box<dyn ImageModel>, model_id: impl Into<String>) -> Self {
        Self { model, model_id: model_id.into() }
    }

    /// Generate one sprite. Issues exactly one model call and never retries.
    ///
    /// # Errors
    ///
    /// Returns one of [`SpriteError::NoCandidates`],
    /// [`SpriteError::EmptyResponse`], [`SpriteError::ModelRefused`],
    /// [`SpriteError::NoImageData`] or [`SpriteError::Transport`].
    pub async fn generate_sprite(&self, options: &GenerationOptions) -> GenerationResult {
        let request = ContentRequest {
            model: self.model_id.clone(),
            prompt: build_prompt(options),
            aspect_ratio: SPRITE_ASPECT_RATIO.to_string(),
        };
        log::info!("Requesting sprite '{}' from {}", options.subject(), self.model_id);

        let result = match self.model.generate_content(&request).await {
            Ok(response) => extract_image(&response),
            Err(e @ SpriteError::Transport(_)) => Err(e),
            Err(e) => Err(SpriteError::transport(e.to_string())),
        };

        if let Err(ref e) = result {
            log::error!("Sprite generation failed: {e}");
        }
        result
    }
}

/// Interpret a model response.
///
/// Only the first candidate is considered. Among its parts the first one
/// carrying inline data wins; failing that, the first non-empty text part is
/// reported as a refusal.
///
/// # Errors
///
/// See [`SpriteClient::generate_sprite`].
pub fn extract_image(response: &ModelResponse) -> GenerationResult {
    let candidate = response.candidates.first().ok_or(SpriteError::NoCandidates)?;

    let parts = candidate
        .content
        .as_ref()
        .map(|c| c.parts.as_slice())
        .filter(|p| !p.is_empty())
        .ok_or(SpriteError::EmptyResponse)?;

    if let Some(inline) = parts.iter().find_map(|p| p.inline_data.as_ref()) {
        return Ok(ImageDataUri::new(&inline.mime_type, &inline.data));
    }

    if let Some(text) = parts.iter().filter_map(|p| p.text.as_deref()).find(|t| !t.is_empty()) {
        return Err(SpriteError::ModelRefused(text.to_string()));
    }

    Err(SpriteError::NoImageData)
}
