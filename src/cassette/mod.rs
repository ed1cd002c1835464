//! Record/replay of model interactions for deterministic testing.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;

/// Port name used for the image model in cassettes.
pub const IMAGE_MODEL_PORT: &str = "image_model";
/// Method name used for content generation in cassettes.
pub const GENERATE_CONTENT_METHOD: &str = "generate_content";
