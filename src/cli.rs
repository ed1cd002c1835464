//! CLI argument parsing with clap.

use clap::Parser;

use crate::error::SpriteError;
use crate::options::{BackgroundType, BandOrientation, GenerationOptions, Resolution};

/// Generate strict pixel-art sprites with Gemini and export them as 256x256 PNG.
#[derive(Parser, Debug)]
#[command(name = "pixelsprite", version, about)]
pub struct Cli {
    /// Character or object to draw, e.g. "a grumpy wizard cat".
    pub subject: Option<String>,

    /// Resolution hint for the model (the export is always 256x256).
    #[arg(short, long, value_enum, default_value_t = Resolution::Strict256)]
    pub resolution: Resolution,

    /// Maximum number of flat colors (2-16).
    #[arg(short = 'c', long, default_value_t = 5)]
    pub max_colors: u8,

    /// Background style.
    #[arg(short, long, value_enum, default_value_t = BackgroundType::Solid)]
    pub background: BackgroundType,

    /// Band direction for a banded background.
    #[arg(long, value_enum, default_value_t = BandOrientation::Horizontal)]
    pub band_orientation: BandOrientation,

    /// Number of bands for a banded background (2-5).
    #[arg(long, default_value_t = 3)]
    pub band_count: u8,

    /// Allow 1-2 small thematic props in the background.
    #[arg(long)]
    pub props: bool,

    /// Model name or short alias (default from config, else nano-banana).
    #[arg(short, long)]
    pub model: Option<String>,

    /// Output PNG path or directory (default ./pixel-sprite-256.png).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the prompt and exit without calling the model.
    #[arg(long)]
    pub dry_run: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build validated generation options from the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is missing or blank, or a numeric flag
    /// is out of range.
    pub fn generation_options(&self) -> Result<GenerationOptions, SpriteError> {
        let subject = self.subject.clone().ok_or_else(|| {
            SpriteError::InvalidArgument("Provide a subject, e.g. pixelsprite \"a grumpy wizard cat\"".into())
        })?;
        GenerationOptions::builder(subject)
            .resolution(self.resolution)
            .max_colors(self.max_colors)
            .background(self.background)
            .band_orientation(self.band_orientation)
            .band_count(self.band_count)
            .include_props(self.props)
            .build()
    }
}
