//! Pixelsprite - strict pixel-art sprite generation.
//!
//! Options are turned into a fixed prompt ([`prompt::build_prompt`]), sent to
//! a Gemini image model through the [`ports::ImageModel`] port
//! ([`client::SpriteClient`]), and the returned bitmap is normalized onto a
//! 256x256 nearest-neighbor canvas ([`canvas::SpriteCanvas`]) for PNG export.

pub mod adapters;
pub mod canvas;
pub mod cassette;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod logger;
pub mod model;
pub mod options;
pub mod ports;
pub mod prompt;
pub mod session;
