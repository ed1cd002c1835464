//! Unified error type for pixelsprite.

use thiserror::Error;

/// Message used when a transport failure carries no text of its own.
pub const TRANSPORT_FALLBACK_MESSAGE: &str = "Failed to generate pixel art.";

/// Errors that can occur while generating or exporting a sprite.
#[derive(Debug, Error)]
pub enum SpriteError {
    /// The model returned no candidates at all.
    #[error(
        "The model failed to generate content (No candidates returned). \
         It might have been blocked by safety filters."
    )]
    NoCandidates,

    /// The first candidate carried no content parts.
    #[error("The model returned an empty response.")]
    EmptyResponse,

    /// The model answered with text instead of an image.
    #[error("Model response: {0}")]
    ModelRefused(String),

    /// Parts were returned but none carried image data or text.
    #[error("No image data found in generation response.")]
    NoImageData,

    /// The call to the model failed before a response could be interpreted.
    #[error("{0}")]
    Transport(String),

    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The returned image could not be decoded or encoded.
    #[error("Image decode error: {0}")]
    Decode(String),

    /// No Gemini API key configured.
    #[error("No Gemini API key. Set {env_var} or add it to the config file.")]
    MissingApiKey {
        /// The environment variable name.
        env_var: String,
    },

    /// A generation request is already pending for this session.
    #[error("A generation request is already in progress")]
    Busy,
}

/// The generation failure taxonomy surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No candidates returned.
    NoCandidates,
    /// Candidate without parts.
    EmptyResponse,
    /// Text-only answer.
    ModelRefused,
    /// Parts without image or text.
    NoImageData,
    /// Network or protocol failure.
    TransportFailure,
}

impl SpriteError {
    /// Wrap a transport failure message, substituting the fallback when empty.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            Self::Transport(TRANSPORT_FALLBACK_MESSAGE.to_string())
        } else {
            Self::Transport(message)
        }
    }

    /// Classify a generation failure. Returns `None` for errors outside the
    /// generation taxonomy (config, I/O, arguments, ...).
    #[must_use]
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::NoCandidates => Some(FailureKind::NoCandidates),
            Self::EmptyResponse => Some(FailureKind::EmptyResponse),
            Self::ModelRefused(_) => Some(FailureKind::ModelRefused),
            Self::NoImageData => Some(FailureKind::NoImageData),
            Self::Transport(_) => Some(FailureKind::TransportFailure),
            _ => None,
        }
    }
}
