//! Port traits defining external boundaries.
//!
//! The image model is the only boundary between the sprite core and the
//! outside world. Implementations live in `src/adapters/`.

pub mod image_model;

pub use image_model::{ContentRequest, ImageModel, ModelResponse};
