//! Replaying adapter: serves recorded model responses, never touches the network.

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::{GENERATE_CONTENT_METHOD, IMAGE_MODEL_PORT};
use crate::error::SpriteError;
use crate::ports::image_model::{ContentRequest, GenerateFuture, ImageModel, ModelResponse};

/// Decode a replayed `{"Ok": ..}` / `{"Err": ".."}` output.
///
/// Recorded errors come back as transport failures carrying the recorded text.
pub(crate) fn replay_result(output: serde_json::Value) -> Result<ModelResponse, SpriteError> {
    if let Some(err) = output.get("Err").or_else(|| output.get("err")) {
        return Err(SpriteError::transport(err.as_str().unwrap_or_default()));
    }
    let ok = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(ok)
        .map_err(|e| SpriteError::Config(format!("Malformed cassette output: {e}")))
}

/// Serves recorded image model results from a cassette.
pub struct ReplayingImageModel {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageModel {
    /// Create a replaying model backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }

    fn next_output(&self) -> Result<serde_json::Value, SpriteError> {
        let mut guard = self
            .replayer
            .lock()
            .map_err(|e| SpriteError::Config(format!("Replayer lock poisoned: {e}")))?;
        guard
            .next_interaction(IMAGE_MODEL_PORT, GENERATE_CONTENT_METHOD)
            .map(|i| i.output)
            .map_err(SpriteError::Config)
    }
}

impl ImageModel for ReplayingImageModel {
    fn generate_content(&self, request: &ContentRequest) -> GenerateFuture<'_> {
        log::debug!("Replaying {IMAGE_MODEL_PORT}::{GENERATE_CONTENT_METHOD} for {}", request.model);
        let result = self.next_output().and_then(replay_result);
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_output_parses_response() {
        let response = replay_result(json!({"Ok": {"candidates": [{"content": {"parts": [
            {"inlineData": {"mimeType": "image/png", "data": "AAAA"}}
        ]}}]}}))
        .unwrap();
        assert_eq!(response.candidates.len(), 1);
    }

    #[test]
    fn err_output_is_transport() {
        let err = replay_result(json!({"Err": "503 upstream"})).unwrap_err();
        assert!(matches!(err, SpriteError::Transport(ref m) if m == "503 upstream"));
    }

    #[test]
    fn bare_output_is_accepted() {
        let response = replay_result(json!({"candidates": []})).unwrap();
        assert!(response.candidates.is_empty());
    }
}
