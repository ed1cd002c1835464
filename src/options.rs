//! Sprite generation options and their validation.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SpriteError;

/// Smallest palette the prompt may request.
pub const MIN_COLORS: u8 = 2;
/// Largest palette the prompt may request.
pub const MAX_COLORS: u8 = 16;
/// Fewest background bands.
pub const MIN_BANDS: u8 = 2;
/// Most background bands.
pub const MAX_BANDS: u8 = 5;

/// Target resolution hint passed to the model.
///
/// Only affects the prompt; the exported canvas is always 256x256.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Resolution {
    /// 64x64, macro sprites.
    #[value(name = "64x64")]
    #[serde(rename = "64x64")]
    Macro64,
    /// 128x128.
    #[value(name = "128x128")]
    #[serde(rename = "128x128")]
    Standard128,
    /// 256x256.
    #[default]
    #[value(name = "256x256")]
    #[serde(rename = "256x256")]
    Strict256,
}

impl Resolution {
    /// The prompt spelling, e.g. `"128x128"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Macro64 => "64x64",
            Self::Standard128 => "128x128",
            Self::Strict256 => "256x256",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Background style behind the character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    /// One flat color.
    #[default]
    Solid,
    /// Several flat color bands.
    Bands,
}

/// Direction of background bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandOrientation {
    /// Bands stacked top to bottom.
    #[default]
    Horizontal,
    /// Bands side by side.
    Vertical,
}

impl BandOrientation {
    /// The prompt spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl fmt::Display for BandOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, immutable parameters for one sprite generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOptions {
    subject: String,
    resolution: Resolution,
    max_colors: u8,
    background: BackgroundType,
    band_orientation: BandOrientation,
    band_count: u8,
    include_props: bool,
}

impl GenerationOptions {
    /// Start building options for the given subject.
    pub fn builder(subject: impl Into<String>) -> GenerationOptionsBuilder {
        GenerationOptionsBuilder::new(subject)
    }

    /// The subject text, exactly as supplied.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Resolution hint.
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Maximum number of flat colors.
    #[must_use]
    pub fn max_colors(&self) -> u8 {
        self.max_colors
    }

    /// Background style.
    #[must_use]
    pub fn background(&self) -> BackgroundType {
        self.background
    }

    /// Band direction, only meaningful for [`BackgroundType::Bands`].
    #[must_use]
    pub fn band_orientation(&self) -> BandOrientation {
        self.band_orientation
    }

    /// Band count, only meaningful for [`BackgroundType::Bands`].
    #[must_use]
    pub fn band_count(&self) -> u8 {
        self.band_count
    }

    /// Whether background props are allowed.
    #[must_use]
    pub fn include_props(&self) -> bool {
        self.include_props
    }

    /// Human-readable summary of the style rules these options apply.
    #[must_use]
    pub fn style_rules(&self) -> Vec<String> {
        let background = match self.background {
            BackgroundType::Solid => "Solid",
            BackgroundType::Bands => "Banded",
        };
        vec![
            format!("Resolution: {} Strict", self.resolution),
            format!("Palette: Max {} Flat Colors", self.max_colors),
            format!("Background: {background}"),
            "No Shading, No Gradients".to_string(),
        ]
    }
}

/// Builder for [`GenerationOptions`]. Defaults match the form defaults:
/// 256x256, 5 colors, solid background, 3 horizontal bands, no props.
#[derive(Debug, Clone)]
pub struct GenerationOptionsBuilder {
    subject: String,
    resolution: Resolution,
    max_colors: u8,
    background: BackgroundType,
    band_orientation: BandOrientation,
    band_count: u8,
    include_props: bool,
}

impl GenerationOptionsBuilder {
    /// Creates a builder with default settings.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            resolution: Resolution::default(),
            max_colors: 5,
            background: BackgroundType::default(),
            band_orientation: BandOrientation::default(),
            band_count: 3,
            include_props: false,
        }
    }

    /// Sets the resolution hint.
    #[must_use]
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the palette size.
    #[must_use]
    pub fn max_colors(mut self, max_colors: u8) -> Self {
        self.max_colors = max_colors;
        self
    }

    /// Sets the background style.
    #[must_use]
    pub fn background(mut self, background: BackgroundType) -> Self {
        self.background = background;
        self
    }

    /// Sets the band direction.
    #[must_use]
    pub fn band_orientation(mut self, orientation: BandOrientation) -> Self {
        self.band_orientation = orientation;
        self
    }

    /// Sets the number of bands.
    #[must_use]
    pub fn band_count(mut self, band_count: u8) -> Self {
        self.band_count = band_count;
        self
    }

    /// Allows or forbids background props.
    #[must_use]
    pub fn include_props(mut self, include_props: bool) -> Self {
        self.include_props = include_props;
        self
    }

    /// Validate and freeze the options.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::InvalidArgument`] if the subject is blank or a
    /// numeric setting is out of range.
    pub fn build(self) -> Result<GenerationOptions, SpriteError> {
        if self.subject.trim().is_empty() {
            return Err(SpriteError::InvalidArgument("Subject must not be empty".into()));
        }
        validate_range("max colors", self.max_colors, MIN_COLORS, MAX_COLORS)?;
        validate_range("band count", self.band_count, MIN_BANDS, MAX_BANDS)?;

        Ok(GenerationOptions {
            subject: self.subject,
            resolution: self.resolution,
            max_colors: self.max_colors,
            background: self.background,
            band_orientation: self.band_orientation,
            band_count: self.band_count,
            include_props: self.include_props,
        })
    }
}

fn validate_range(name: &str, value: u8, min: u8, max: u8) -> Result<(), SpriteError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SpriteError::InvalidArgument(format!(
            "Unsupported {name} '{value}'. Valid: {min}-{max}"
        )))
    }
}
