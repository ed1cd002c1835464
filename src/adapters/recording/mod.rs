//! Recording adapter: delegates to a live model and captures each call.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::{GENERATE_CONTENT_METHOD, IMAGE_MODEL_PORT};
use crate::ports::image_model::{ContentRequest, GenerateFuture, ImageModel};

/// Encode a result using the `{"Ok": ..}` / `{"Err": ".."}` cassette convention.
pub(crate) fn result_to_json<T: Serialize, E: std::fmt::Display>(
    result: &Result<T, E>,
) -> serde_json::Value {
    match result {
        Ok(v) => match serde_json::to_value(v) {
            Ok(inner) => serde_json::json!({ "Ok": inner }),
            Err(e) => serde_json::json!({ "Err": format!("unserializable output: {e}") }),
        },
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    }
}

/// Records image model interactions while delegating to an inner implementation.
pub struct RecordingImageModel {
    inner: Box<dyn ImageModel>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageModel {
    /// Wrap `inner`, appending every call to `recorder`.
    pub fn new(inner: Box<dyn ImageModel>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageModel for RecordingImageModel {
    fn generate_content(&self, request: &ContentRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate_content(&request).await;
            let input = serde_json::to_value(&request).unwrap_or_default();
            let output = result_to_json(&result);
            match recorder.lock() {
                Ok(mut guard) => {
                    guard.record(IMAGE_MODEL_PORT, GENERATE_CONTENT_METHOD, input, output);
                }
                Err(e) => log::warn!("Recorder lock poisoned, interaction dropped: {e}"),
            }
            result
        })
    }
}
