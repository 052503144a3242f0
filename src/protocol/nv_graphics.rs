//! # NV Bit Images (FS q / FS p)
//!
//! Non-volatile images are stored in the printer's flash memory and survive
//! power cycles, so logos can be reprinted without retransmission.
//!
//! ## Define NV Bit Images (FS q n [xL xH yL yH d1...dk]1 ... [..]n)
//!
//! | Format  | Bytes |
//! |---------|-------|
//! | ASCII   | FS q n [xL xH yL yH d1...dk]... |
//! | Hex     | 1C 71 n [xL xH yL yH d1...dk]... |
//!
//! - `n`: number of images (1-255); every definition replaces all stored images
//! - `xL, xH`: image width in dots
//! - `yL, yH`: image height in bytes (8 dots per byte)
//! - `d1...dk`: column-major data, `yL + yH * 256` bytes per column, MSB on top
//!
//! Storage is monochrome: the red layer is not recorded, and red pixels are
//! stored as black if they are dark enough.

use std::path::Path;

use log::debug;

use super::commands::{CommandBuffer, FS, TwoByte};
use super::graphics::{PixelMatrix, encode_bands};
use crate::error::{Result, RojoError};

/// Maximum number of images in one definition
pub const MAX_IMAGES: usize = 255;

/// Encode one NV image block: `xL xH yL yH` followed by column-major data.
///
/// ## Example
///
/// ```
/// use rojo::protocol::graphics::PixelMatrix;
/// use rojo::protocol::nv_graphics;
///
/// // 2x10 black image: 2 bytes per column
/// let data = [0u8, 0, 0, 255].repeat(20);
/// let matrix = PixelMatrix::from_rgba(2, 10, &data).unwrap();
/// let block = nv_graphics::nv_image_data(&matrix).unwrap();
///
/// assert_eq!(block, vec![2, 0, 2, 0, 0xFF, 0xC0, 0xFF, 0xC0]);
/// ```
pub fn nv_image_data(matrix: &PixelMatrix) -> Result<Vec<u8>> {
    if matrix.width() == 0 || matrix.height() == 0 {
        return Err(RojoError::MalformedInput(format!(
            "NV image must not be empty ({}x{})",
            matrix.width(),
            matrix.height()
        )));
    }

    let x = TwoByte::from_len(matrix.width())?;
    let bands = encode_bands(matrix, false);
    let y = TwoByte::from_len(bands.len())?;

    let mut buf = CommandBuffer::with_capacity(4 + matrix.width() * bands.len());
    buf.append(&x.bytes());
    buf.append(&y.bytes());

    // Bands are row-major; NV storage walks each column top to bottom
    let mut column = Vec::with_capacity(bands.len());
    for col in 0..matrix.width() {
        column.clear();
        column.extend(bands.iter().map(|band| band.columns[col]));
        buf.append(&column);
    }

    Ok(buf.into_bytes())
}

/// # Define NV Bit Images (FS q n ...)
///
/// Builds a complete definition command for `images`, in order. The printer
/// numbers them from 1.
pub fn define_nv_images(images: &[PixelMatrix]) -> Result<Vec<u8>> {
    RojoError::check_range("NV image count", images.len() as i64, 1, MAX_IMAGES as i64)?;

    let mut buf = CommandBuffer::new();
    buf.append(&[FS, b'q', images.len() as u8]);
    for image in images {
        buf.append(&nv_image_data(image)?);
    }

    debug!("defined {} NV images, {} bytes", images.len(), buf.len());
    Ok(buf.into_bytes())
}

/// Load image files and define them as NV images.
///
/// Not supported: file decoding belongs to the caller. Decode the files and
/// pass the pixel data to [`define_nv_images`] instead.
pub fn load_nv_images<P: AsRef<Path>>(_paths: &[P]) -> Result<Vec<u8>> {
    Err(RojoError::UnsupportedOperation("loading NV images from files"))
}

/// Print a stored NV image (FS p n m).
///
/// Not supported.
pub fn print_nv_image(_number: u8, _mode: u8) -> Result<Vec<u8>> {
    Err(RojoError::UnsupportedOperation("printing NV images"))
}
