//! # Image Printing
//!
//! Decodes an image file, shrinks it to the printer's image box and hands
//! the pixels to the raster encoder.
//!
//! Images taller than `max_image_height` are scaled to that height;
//! otherwise images wider than `max_image_width` are scaled to that width.
//! Smaller images print at their native size.

use std::str::FromStr;

use image::{DynamicImage, ImageFormat, RgbaImage, imageops::FilterType};
use log::debug;

use super::scale::{Dimensions, scale_to_height, scale_to_width};
use crate::error::{Result, RojoError};
use crate::printer::PrinterConfig;
use crate::protocol::graphics::{self, PixelMatrix};

/// Input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileType {
    #[default]
    Png,
    Bmp,
}

impl FromStr for FileType {
    type Err = RojoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(FileType::Png),
            "bmp" => Ok(FileType::Bmp),
            _ => Err(RojoError::UnknownConfigurationKey {
                setting: "filetype",
                key: s.to_string(),
            }),
        }
    }
}

/// Decode PNG bytes.
pub fn decode_png(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| RojoError::Image(format!("Failed to decode PNG: {}", e)))
}

/// Target size for `image` under `config`'s limits, or `None` if it fits.
pub fn constrained_size(width: u32, height: u32, config: &PrinterConfig) -> Result<Option<(u32, u32)>> {
    let original = Dimensions::new(width as f64, height as f64);
    let scaled = if height > config.max_image_height {
        scale_to_height(original, config.max_image_height as f64)?
    } else if width > config.max_image_width {
        scale_to_width(original, config.max_image_width as f64)?
    } else {
        return Ok(None);
    };
    Ok(Some(scaled.to_pixels()))
}

/// Shrink `image` to fit `config`'s image box.
pub fn constrain(image: DynamicImage, config: &PrinterConfig) -> Result<RgbaImage> {
    match constrained_size(image.width(), image.height(), config)? {
        Some((width, height)) => {
            debug!(
                "resizing {}x{} image to {}x{}",
                image.width(),
                image.height(),
                width,
                height
            );
            Ok(image
                .resize_exact(width, height, FilterType::Lanczos3)
                .to_rgba8())
        }
        None => Ok(image.to_rgba8()),
    }
}

/// Rasterize an already-decoded image without resizing.
pub fn print_rgba(image: &RgbaImage, config: &PrinterConfig) -> Result<Vec<u8>> {
    let matrix = PixelMatrix::from_image(image);
    graphics::raster_image(&matrix, &config.raster)
}

/// # Print an Image File
///
/// Decode `bytes` as `filetype`, constrain and rasterize.
/// BMP input is not supported.
pub fn print_image(bytes: &[u8], filetype: FileType, config: &PrinterConfig) -> Result<Vec<u8>> {
    match filetype {
        FileType::Png => {
            let decoded = decode_png(bytes)?;
            let image = constrain(decoded, config)?;
            print_rgba(&image, config)
        }
        FileType::Bmp => print_bmp(bytes),
    }
}

/// BMP rasterization is not implemented.
pub fn print_bmp(_bytes: &[u8]) -> Result<Vec<u8>> {
    Err(RojoError::UnsupportedOperation("BMP rasterization"))
}
