//! Picks the image model implementation: live, recording or replaying.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::gemini::GeminiImageModel;
use crate::adapters::recording::RecordingImageModel;
use crate::adapters::replaying::ReplayingImageModel;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::IMAGE_MODEL_PORT;
use crate::config::{Config, API_KEY_ENV_VARS};
use crate::error::SpriteError;
use crate::ports::ImageModel;

/// Environment variable naming a cassette to replay.
pub const REPLAY_ENV_VAR: &str = "PIXELSPRITE_REPLAY";
/// Environment variable enabling recording (`1` or `true`).
pub const RECORD_ENV_VAR: &str = "PIXELSPRITE_REC";

/// Holds the image model the rest of the program talks to.
pub struct ServiceContext {
    /// Image model port.
    pub model: Box<dyn ImageModel>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Write the recorded cassette to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette is still shared or cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context against the Gemini API.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured.
    pub fn live(config: &Config) -> Result<Self, SpriteError> {
        let key = config
            .gemini_key()
            .ok_or_else(|| SpriteError::MissingApiKey { env_var: API_KEY_ENV_VARS[0].into() })?;
        Ok(Self { model: Box::new(GeminiImageModel::new(key)) })
    }

    /// Create a live context whose calls are captured to a new cassette
    /// under `.pixelsprite/cassettes/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), SpriteError> {
        let live = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".pixelsprite/cassettes")
            .join(&timestamp)
            .join(format!("{IMAGE_MODEL_PORT}.cassette.yaml"));
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-{IMAGE_MODEL_PORT}"),
            get_commit_hash(),
        )));

        let model = RecordingImageModel::new(live.model, Arc::clone(&recorder));
        Ok((Self { model: Box::new(model) }, RecordingSession { recorder }))
    }

    /// Create a context that replays a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, SpriteError> {
        let replayer = load_cassette(path)
            .map_err(|e| SpriteError::Config(format!("Failed to load cassette: {e}")))?;
        let model = ReplayingImageModel::new(Arc::new(Mutex::new(replayer)));
        Ok(Self { model: Box::new(model) })
    }

    /// Select live, recording or replaying mode from the environment.
    ///
    /// # Errors
    ///
    /// Propagates errors from the selected constructor.
    pub fn from_env(config: &Config) -> Result<(Self, Option<RecordingSession>), SpriteError> {
        if let Ok(cassette) = std::env::var(REPLAY_ENV_VAR) {
            log::info!("Replaying from {cassette}");
            return Ok((Self::replaying(Path::new(&cassette))?, None));
        }
        if std::env::var(RECORD_ENV_VAR).is_ok_and(|v| v == "true" || v == "1") {
            log::info!("Recording mode enabled");
            let (ctx, session) = Self::recording(config)?;
            return Ok((ctx, Some(session)));
        }
        Ok((Self::live(config)?, None))
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
