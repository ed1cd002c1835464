//! Fixed-size sprite canvas with nearest-neighbor normalization and PNG export.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{ImageFormat, RgbaImage};

use crate::client::ImageDataUri;
use crate::error::SpriteError;

/// Canvas edge length in pixels. Independent of the requested resolution.
pub const CANVAS_SIZE: u32 = 256;

/// File name offered for the exported sprite.
pub const EXPORT_FILE_NAME: &str = "pixel-sprite-256.png";

/// Holds at most one normalized sprite.
#[derive(Debug, Default)]
pub struct SpriteCanvas {
    image: Option<RgbaImage>,
}

impl SpriteCanvas {
    /// An empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `uri` and draw it at 256x256 without smoothing, replacing any
    /// previous image.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Decode`] if the payload is not a decodable
    /// image. The canvas is left empty in that case.
    pub fn draw(&mut self, uri: &ImageDataUri) -> Result<(), SpriteError> {
        self.image = None;
        let bytes = uri.decode_bytes()?;
        let source = image::load_from_memory(&bytes)
            .map_err(|e| SpriteError::Decode(format!("Failed to decode {}: {e}", uri.mime_type())))?;
        log::debug!("Decoded {}x{} {} sprite", source.width(), source.height(), uri.mime_type());

        self.image = Some(normalize(&source.to_rgba8()));
        Ok(())
    }

    /// The current raster, if any.
    #[must_use]
    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    /// Whether no image is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.image.is_none()
    }

    /// Drop the current image.
    pub fn clear(&mut self) {
        self.image = None;
    }

    /// Encode the canvas as PNG. `None` when nothing is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Decode`] if PNG encoding fails.
    pub fn export_png(&self) -> Result<Option<Vec<u8>>, SpriteError> {
        let Some(image) = &self.image else {
            return Ok(None);
        };
        let mut buf = Cursor::new(Vec::new());
        image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| SpriteError::Decode(format!("Failed to encode PNG: {e}")))?;
        Ok(Some(buf.into_inner()))
    }

    /// Write the PNG to `target`. A directory receives [`EXPORT_FILE_NAME`];
    /// anything else is used as the file path. `None` when nothing is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn export_to(&self, target: &Path) -> Result<Option<PathBuf>, SpriteError> {
        let Some(png) = self.export_png()? else {
            return Ok(None);
        };
        let path = export_path(target);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&path, png)?;
        Ok(Some(path))
    }
}

/// Resolve the export destination for `target`.
///
/// A target that ends with a path separator or names an existing directory
/// gets [`EXPORT_FILE_NAME`] appended.
#[must_use]
pub fn export_path(target: &Path) -> PathBuf {
    let is_dir = target
        .as_os_str()
        .to_string_lossy()
        .ends_with(['/', std::path::MAIN_SEPARATOR])
        || target.is_dir();
    if is_dir {
        target.join(EXPORT_FILE_NAME)
    } else {
        target.to_path_buf()
    }
}

/// Resample to the canvas size with nearest-neighbor, keeping hard edges.
fn normalize(source: &RgbaImage) -> RgbaImage {
    if source.dimensions() == (CANVAS_SIZE, CANVAS_SIZE) {
        return source.clone();
    }
    image::imageops::resize(source, CANVAS_SIZE, CANVAS_SIZE, FilterType::Nearest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use image::{DynamicImage, Rgba};

    fn encode(image: &RgbaImage, format: ImageFormat) -> ImageDataUri {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image.clone()).write_to(&mut buf, format).unwrap();
        let data = base64::engine::general_purpose::STANDARD.encode(buf.into_inner());
        let mime = if format == ImageFormat::Png { "image/png" } else { "image/jpeg" };
        ImageDataUri::new(mime, data)
    }

    fn checker(size: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn empty_canvas_exports_nothing() {
        let canvas = SpriteCanvas::new();
        assert!(canvas.is_empty());
        assert!(canvas.export_png().unwrap().is_none());
        let dir = std::env::temp_dir().join("pixelsprite_canvas_empty");
        assert!(canvas.export_to(&dir.join("x.png")).unwrap().is_none());
        assert!(!dir.join("x.png").exists());
    }

    #[test]
    fn small_source_upscaled_with_hard_edges() {
        let mut canvas = SpriteCanvas::new();
        canvas.draw(&encode(&checker(4), ImageFormat::Png)).unwrap();

        let image = canvas.image().unwrap();
        assert_eq!(image.dimensions(), (256, 256));
        // Each source pixel becomes a 64x64 block of the same color.
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(63, 63), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(64, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(image.get_pixel(127, 10), &Rgba([0, 0, 255, 255]));
        for pixel in image.pixels() {
            assert!(
                *pixel == Rgba([255, 0, 0, 255]) || *pixel == Rgba([0, 0, 255, 255]),
                "interpolated color {pixel:?}"
            );
        }
    }

    #[test]
    fn export_is_always_256() {
        for size in [64, 128, 256, 1024] {
            let mut canvas = SpriteCanvas::new();
            canvas.draw(&encode(&checker(size), ImageFormat::Png)).unwrap();
            let png = canvas.export_png().unwrap().unwrap();
            let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (256, 256), "source {size}");
        }
    }

    #[test]
    fn jpeg_source_is_accepted() {
        let mut canvas = SpriteCanvas::new();
        let rgb = RgbaImage::from_pixel(8, 8, Rgba([10, 200, 30, 255]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(rgb).to_rgb8().write_to(&mut buf, ImageFormat::Jpeg).unwrap();
        let uri = ImageDataUri::new(
            "image/jpeg",
            base64::engine::general_purpose::STANDARD.encode(buf.into_inner()),
        );
        canvas.draw(&uri).unwrap();
        assert_eq!(canvas.image().unwrap().dimensions(), (256, 256));
    }

    #[test]
    fn undecodable_payload_leaves_canvas_empty() {
        let mut canvas = SpriteCanvas::new();
        canvas.draw(&encode(&checker(4), ImageFormat::Png)).unwrap();
        let garbage = ImageDataUri::new(
            "image/png",
            base64::engine::general_purpose::STANDARD.encode(b"not an image"),
        );
        assert!(matches!(canvas.draw(&garbage), Err(SpriteError::Decode(_))));
        assert!(canvas.is_empty());
    }

    #[test]
    fn clear_drops_image() {
        let mut canvas = SpriteCanvas::new();
        canvas.draw(&encode(&checker(2), ImageFormat::Png)).unwrap();
        assert!(!canvas.is_empty());
        canvas.clear();
        assert!(canvas.export_png().unwrap().is_none());
    }

    #[test]
    fn export_to_directory_uses_fixed_name() {
        let dir = std::env::temp_dir().join("pixelsprite_canvas_export_dir");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let mut canvas = SpriteCanvas::new();
        canvas.draw(&encode(&checker(16), ImageFormat::Png)).unwrap();
        let path = canvas.export_to(&dir).unwrap().unwrap();
        assert_eq!(path, dir.join(EXPORT_FILE_NAME));
        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_to_explicit_file() {
        let dir = std::env::temp_dir().join("pixelsprite_canvas_export_file");
        let _ = std::fs::remove_dir_all(&dir);
        let target = dir.join("sub/hero.png");

        let mut canvas = SpriteCanvas::new();
        canvas.draw(&encode(&checker(16), ImageFormat::Png)).unwrap();
        assert_eq!(canvas.export_to(&target).unwrap(), Some(target.clone()));
        assert!(target.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_to_missing_directory_with_trailing_slash() {
        let dir = std::env::temp_dir().join("pixelsprite_canvas_new_dir");
        let _ = std::fs::remove_dir_all(&dir);
        let target = PathBuf::from(format!("{}/", dir.display()));

        let mut canvas = SpriteCanvas::new();
        canvas.draw(&encode(&checker(16), ImageFormat::Png)).unwrap();
        let path = canvas.export_to(&target).unwrap().unwrap();
        assert_eq!(path, dir.join(EXPORT_FILE_NAME));
        assert!(path.is_file());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_path_is_stable_once_resolved() {
        let target = Path::new("sprites/");
        let resolved = export_path(target);
        assert_eq!(resolved, Path::new("sprites").join(EXPORT_FILE_NAME));
        assert_eq!(export_path(&resolved), resolved);
    }
}
