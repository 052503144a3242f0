//! # Bit Image Graphics (ESC *)
//!
//! Converts RGBA pixel data into the printer's 8-dot bit image format.
//!
//! ## Band Layout
//!
//! The image is cut into horizontal bands of 8 rows. Each band becomes one
//! `ESC * m nL nH` command carrying exactly `width` bytes, one per pixel
//! column. Each byte stacks the 8 rows of that column vertically:
//!
//! ```text
//!             column x
//!   row 0   ┌───┐  bit 7 (MSB)
//!   row 1   │   │  bit 6
//!   ...     │   │  ...
//!   row 7   └───┘  bit 0 (LSB)
//! ```
//!
//! The last band may be shorter than 8 rows; its missing rows read as
//! transparent pixels and leave their bits clear.
//!
//! ## Pixel Classification
//!
//! A bit is set when the pixel is opaque enough (`a > 126`) and dark enough
//! (BT.709 luminance `0.2126r + 0.7152g + 0.0722b < 128`).
//!
//! ## Red Bands
//!
//! When red printing is enabled, a band that contains any pure red pixel
//! (`r >= 250, g == 0, b == 0`) is printed on the red layer: the band is
//! wrapped in `ESC r 1` / `ESC r 0`. The classification is per band, not
//! per column.
//!
//! ## Dot-Matrix Thinning
//!
//! With `dot_matrix` enabled only every other pixel can set a bit, in a
//! checkerboard that continues across columns and bands. This lightens
//! solid areas on heads that smear at full density.

use image::RgbaImage;
use log::{debug, warn};
use serde::Deserialize;

use super::color::{self, PrintColor};
use super::commands::{CommandBuffer, ESC, TwoByte, band_feed};
use crate::error::{Result, RojoError};

/// Rows per raster band
pub const BAND_HEIGHT: usize = 8;

/// Alpha at or below this value counts as transparent
pub const ALPHA_THRESHOLD: u8 = 126;

/// Luminance below this value prints black
pub const LUMINANCE_THRESHOLD: f64 = 128.0;

// ============================================================================
// PIXELS
// ============================================================================

/// One RGBA pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black, used for every out-of-bounds read
    pub const TRANSPARENT: Pixel = Pixel {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Perceptual grayscale (ITU-R BT.709)
    #[inline]
    pub fn luminance(&self) -> f64 {
        0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a > ALPHA_THRESHOLD
    }

    /// Whether this pixel sets a bit in the monochrome output
    #[inline]
    pub fn is_ink(&self) -> bool {
        self.is_opaque() && self.luminance() < LUMINANCE_THRESHOLD
    }

    /// Pure red marker that switches a whole band to the red layer
    #[inline]
    pub fn is_red(&self) -> bool {
        self.r >= 250 && self.g == 0 && self.b == 0
    }
}

/// Row-major pixel grid built once from a flat RGBA buffer.
///
/// Reads outside `[0, width) x [0, height)` return [`Pixel::TRANSPARENT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    width: usize,
    height: usize,
    rows: Vec<Vec<Pixel>>,
}

impl PixelMatrix {
    /// Build from `width * height * 4` bytes of RGBA data.
    pub fn from_rgba(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let width = width as usize;
        let height = height as usize;
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| {
                RojoError::MalformedInput(format!("image {}x{} is too large", width, height))
            })?;

        if data.len() != expected {
            return Err(RojoError::MalformedInput(format!(
                "pixel buffer has {} bytes, expected {} for {}x{} RGBA",
                data.len(),
                expected,
                width,
                height
            )));
        }

        let rows = if width == 0 {
            vec![Vec::new(); height]
        } else {
            data.chunks_exact(width * 4)
                .map(|row| {
                    row.chunks_exact(4)
                        .map(|p| Pixel::new(p[0], p[1], p[2], p[3]))
                        .collect()
                })
                .collect()
        };

        Ok(Self {
            width,
            height,
            rows,
        })
    }

    /// Build from a decoded image.
    pub fn from_image(image: &RgbaImage) -> Self {
        let rows = image
            .rows()
            .map(|row| row.map(|p| Pixel::new(p[0], p[1], p[2], p[3])).collect())
            .collect();
        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            rows,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`, transparent when out of bounds
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Pixel {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(Pixel::TRANSPARENT)
    }

    /// Number of 8-row bands covering the image
    #[inline]
    pub fn band_count(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.height.div_ceil(BAND_HEIGHT)
        }
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Horizontal dot density of the bit image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "u8")]
pub enum Density {
    /// 8-dot single density (`m = 0`)
    #[default]
    Single,
    /// 8-dot double density (`m = 1`)
    Double,
}

impl Density {
    /// The `m` byte of `ESC * m nL nH`
    pub const fn mode_byte(self) -> u8 {
        match self {
            Density::Single => 0x00,
            Density::Double => 0x01,
        }
    }
}

impl From<u8> for Density {
    fn from(value: u8) -> Self {
        match value {
            1 => Density::Single,
            2 => Density::Double,
            other => {
                warn!("density {} not supported, using single density", other);
                Density::Single
            }
        }
    }
}

/// Raster encoding settings
///
/// Deserializes from `{"density": 1|2, "dotMatrix": bool, "printRed": bool}`;
/// missing keys take their defaults and unknown keys are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RasterOptions {
    pub density: Density,
    pub dot_matrix: bool,
    /// Route bands containing pure red pixels to the red layer
    pub print_red: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            density: Density::Single,
            dot_matrix: false,
            print_red: true,
        }
    }
}

impl RasterOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| RojoError::MalformedInput(format!("raster settings: {}", e)))
    }

    pub fn density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    pub fn dot_matrix(mut self, enabled: bool) -> Self {
        self.dot_matrix = enabled;
        self
    }

    pub fn print_red(mut self, enabled: bool) -> Self {
        self.print_red = enabled;
        self
    }
}

// ============================================================================
// BANDS
// ============================================================================

/// One encoded 8-row slice of the image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBand {
    /// One byte per pixel column, MSB = top row
    pub columns: Vec<u8>,
    /// At least one pure red pixel lies in this band
    pub red: bool,
}

/// Encode band `index` of `matrix`.
pub fn encode_band(matrix: &PixelMatrix, index: usize, dot_matrix: bool) -> RasterBand {
    let width = matrix.width();
    let top = index * BAND_HEIGHT;
    let mut columns = Vec::with_capacity(width);
    let mut red = false;

    for x in 0..width {
        // Checkerboard phase runs continuously over every column of every band
        let phase = index * width + x;
        let mut byte = 0u8;

        for k in 0..BAND_HEIGHT {
            let pixel = matrix.get(x, top + k);
            red |= pixel.is_red();

            let eligible = !dot_matrix || (phase + k) % 2 == 0;
            if eligible && pixel.is_ink() {
                byte |= 1 << (7 - k);
            }
        }

        columns.push(byte);
    }

    RasterBand { columns, red }
}

/// Encode every band of `matrix` in top-to-bottom order.
pub fn encode_bands(matrix: &PixelMatrix, dot_matrix: bool) -> Vec<RasterBand> {
    (0..matrix.band_count())
        .map(|index| encode_band(matrix, index, dot_matrix))
        .collect()
}

/// # Bit Image Header (ESC * m nL nH)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC * m nL nH d1...dk |
/// | Hex     | 1B 2A m nL nH d1...dk |
///
/// - `m`: density (0 = single, 1 = double)
/// - `nL, nH`: number of columns, little-endian
/// - `k = nL + nH * 256` column bytes follow
pub fn bit_image_header(density: Density, width: usize) -> Result<[u8; 5]> {
    let [nl, nh] = TwoByte::from_len(width)?.bytes();
    Ok([ESC, b'*', density.mode_byte(), nl, nh])
}

/// Append one band (with its color switches and feed) to `buf`.
pub fn append_band(buf: &mut CommandBuffer, header: &[u8; 5], band: &RasterBand, print_red: bool) {
    let red = print_red && band.red;
    if red {
        color::switch_to(buf, PrintColor::Red);
    }
    buf.append(header);
    buf.append(&band.columns);
    buf.append(&band_feed());
    if red {
        color::switch_to(buf, PrintColor::Black);
    }
}

/// # Rasterize an Image
///
/// Emits, per band: optional `ESC r 1`, `ESC * m nL nH` + column bytes,
/// `ESC J 16`, optional `ESC r 0`. An image with zero width or height
/// produces an empty command.
///
/// ## Example
///
/// ```
/// use rojo::protocol::graphics::{self, PixelMatrix, RasterOptions};
///
/// // 1x8 column of opaque black pixels
/// let data = [0u8, 0, 0, 255].repeat(8);
/// let matrix = PixelMatrix::from_rgba(1, 8, &data).unwrap();
/// let cmd = graphics::raster_image(&matrix, &RasterOptions::default()).unwrap();
///
/// assert_eq!(cmd, vec![0x1B, 0x2A, 0x00, 1, 0, 0xFF, 0x1B, 0x4A, 0x10]);
/// ```
pub fn raster_image(matrix: &PixelMatrix, options: &RasterOptions) -> Result<Vec<u8>> {
    if matrix.width() == 0 || matrix.height() == 0 {
        return Ok(Vec::new());
    }

    let header = bit_image_header(options.density, matrix.width())?;
    let bands = encode_bands(matrix, options.dot_matrix);

    let band_len = header.len() + matrix.width() + 3;
    let mut buf = CommandBuffer::with_capacity(bands.len() * (band_len + 6));
    for band in &bands {
        append_band(&mut buf, &header, band, options.print_red);
    }

    debug!(
        "rasterized {}x{} image into {} bands ({} red), {} bytes",
        matrix.width(),
        matrix.height(),
        bands.len(),
        bands.iter().filter(|b| b.red).count(),
        buf.len()
    );

    Ok(buf.into_bytes())
}

/// Rasterize a flat `width * height * 4` RGBA buffer.
pub fn raster_rgba(width: u32, height: u32, data: &[u8], options: &RasterOptions) -> Result<Vec<u8>> {
    let matrix = PixelMatrix::from_rgba(width, height, data)?;
    raster_image(&matrix, options)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const RED: [u8; 4] = [255, 0, 0, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    fn matrix(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 4]) -> PixelMatrix {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend(pixel(x, y));
            }
        }
        PixelMatrix::from_rgba(width, height, &data).unwrap()
    }

    #[test]
    fn test_pixel_classification() {
        assert!(Pixel::new(0, 0, 0, 255).is_ink());
        assert!(!Pixel::new(255, 255, 255, 255).is_ink());
        // Opaque threshold is strict
        assert!(!Pixel::new(0, 0, 0, 126).is_ink());
        assert!(Pixel::new(0, 0, 0, 127).is_ink());
        // Mid-gray: 0.2126*128 + 0.7152*128 + 0.0722*128 = 128
        assert!(!Pixel::new(128, 128, 128, 255).is_ink());
        assert!(Pixel::new(127, 127, 127, 255).is_ink());
    }

    #[test]
    fn test_red_predicate() {
        assert!(Pixel::new(250, 0, 0, 255).is_red());
        assert!(Pixel::new(255, 0, 0, 0).is_red());
        assert!(!Pixel::new(249, 0, 0, 255).is_red());
        assert!(!Pixel::new(255, 1, 0, 255).is_red());
        assert!(!Pixel::TRANSPARENT.is_red());
    }

    #[test]
    fn test_from_rgba_rejects_wrong_length() {
        let err = PixelMatrix::from_rgba(2, 2, &[0; 15]).unwrap_err();
        assert!(matches!(err, RojoError::MalformedInput(_)));
    }

    #[test]
    fn test_out_of_bounds_is_transparent() {
        let m = matrix(1, 1, |_, _| BLACK);
        assert_eq!(m.get(0, 0), Pixel::new(0, 0, 0, 255));
        assert_eq!(m.get(1, 0), Pixel::TRANSPARENT);
        assert_eq!(m.get(0, 9), Pixel::TRANSPARENT);
    }

    #[test]
    fn test_band_count() {
        assert_eq!(matrix(3, 1, |_, _| WHITE).band_count(), 1);
        assert_eq!(matrix(3, 8, |_, _| WHITE).band_count(), 1);
        assert_eq!(matrix(3, 9, |_, _| WHITE).band_count(), 2);
        assert_eq!(matrix(0, 9, |_, _| WHITE).band_count(), 0);
    }

    #[test]
    fn test_single_black_column() {
        let m = matrix(1, 8, |_, _| BLACK);
        let cmd = raster_image(&m, &RasterOptions::default()).unwrap();
        assert_eq!(cmd, vec![0x1B, 0x2A, 0x00, 0x01, 0x00, 0xFF, 0x1B, 0x4A, 0x10]);
    }

    #[test]
    fn test_bit_order_is_msb_top() {
        // Only row 0 and row 7 are black
        let m = matrix(1, 8, |_, y| if y == 0 || y == 7 { BLACK } else { WHITE });
        let bands = encode_bands(&m, false);
        assert_eq!(bands[0].columns, vec![0b1000_0001]);
    }

    #[test]
    fn test_short_last_band_padded() {
        // 10 rows: second band has rows 8 and 9 only
        let m = matrix(2, 10, |_, _| BLACK);
        let bands = encode_bands(&m, false);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].columns, vec![0xFF, 0xFF]);
        assert_eq!(bands[1].columns, vec![0b1100_0000, 0b1100_0000]);
    }

    #[test]
    fn test_transparent_image_has_no_bits() {
        let m = matrix(5, 20, |_, _| CLEAR);
        let cmd = raster_image(&m, &RasterOptions::default()).unwrap();

        // 3 bands, each: 5 header + 5 data + 3 feed
        assert_eq!(cmd.len(), 3 * 13);
        for band in cmd.chunks(13) {
            assert_eq!(&band[0..5], &[0x1B, 0x2A, 0x00, 5, 0]);
            assert_eq!(&band[5..10], &[0; 5]);
            assert_eq!(&band[10..], &[0x1B, 0x4A, 0x10]);
        }
    }

    #[test]
    fn test_empty_image() {
        let m = PixelMatrix::from_rgba(0, 0, &[]).unwrap();
        assert!(raster_image(&m, &RasterOptions::default()).unwrap().is_empty());

        let m = PixelMatrix::from_rgba(4, 0, &[]).unwrap();
        assert!(raster_image(&m, &RasterOptions::default()).unwrap().is_empty());

        let m = PixelMatrix::from_rgba(0, 4, &[]).unwrap();
        assert!(raster_image(&m, &RasterOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_double_density_mode_byte() {
        let m = matrix(1, 8, |_, _| BLACK);
        let opts = RasterOptions::default().density(Density::Double);
        let cmd = raster_image(&m, &opts).unwrap();
        assert_eq!(cmd[2], 0x01);
    }

    #[test]
    fn test_wide_image_header() {
        let m = matrix(300, 1, |_, _| WHITE);
        let header = &raster_image(&m, &RasterOptions::default()).unwrap()[0..5];
        // 300 = 0x012C
        assert_eq!(header, &[0x1B, 0x2A, 0x00, 0x2C, 0x01]);
    }

    #[test]
    fn test_dot_matrix_checkerboard() {
        let m = matrix(2, 8, |_, _| BLACK);
        let bands = encode_bands(&m, true);
        // Column 0 starts "on", column 1 starts "off"
        assert_eq!(bands[0].columns, vec![0b1010_1010, 0b0101_0101]);
    }

    #[test]
    fn test_dot_matrix_phase_continues_across_bands() {
        // Odd width: band 1 starts on an odd phase
        let m = matrix(1, 16, |_, _| BLACK);
        let bands = encode_bands(&m, true);
        assert_eq!(bands[0].columns, vec![0b1010_1010]);
        assert_eq!(bands[1].columns, vec![0b0101_0101]);
    }

    #[test]
    fn test_red_band_wrapped_in_color_switch() {
        // Band 0 has a red pixel, band 1 does not
        let m = matrix(2, 16, |x, y| if x == 1 && y == 3 { RED } else { WHITE });
        let cmd = raster_image(&m, &RasterOptions::default()).unwrap();

        let mut expected = vec![0x1B, 0x72, 0x01];
        expected.extend([0x1B, 0x2A, 0x00, 2, 0, 0x00, 0b0001_0000, 0x1B, 0x4A, 0x10]);
        expected.extend([0x1B, 0x72, 0x00]);
        expected.extend([0x1B, 0x2A, 0x00, 2, 0, 0x00, 0x00, 0x1B, 0x4A, 0x10]);
        assert_eq!(cmd, expected);
    }

    #[test]
    fn test_print_red_disabled() {
        let m = matrix(1, 8, |_, _| RED);
        let opts = RasterOptions::default().print_red(false);
        let cmd = raster_image(&m, &opts).unwrap();
        assert_eq!(cmd, vec![0x1B, 0x2A, 0x00, 1, 0, 0xFF, 0x1B, 0x4A, 0x10]);
    }

    #[test]
    fn test_options_from_json() {
        let opts = RasterOptions::from_json(r#"{"density": 2, "dotMatrix": true, "other": 1}"#)
            .unwrap();
        assert_eq!(opts.density, Density::Double);
        assert!(opts.dot_matrix);
        assert!(opts.print_red);

        let opts = RasterOptions::from_json("{}").unwrap();
        assert_eq!(opts, RasterOptions::default());

        let opts = RasterOptions::from_json(r#"{"density": 5}"#).unwrap();
        assert_eq!(opts.density, Density::Single);
    }

    #[test]
    fn test_width_limit() {
        let width = 65_536u32;
        let data = vec![0u8; width as usize * 4];
        let err = raster_rgba(width, 1, &data, &RasterOptions::default()).unwrap_err();
        assert!(matches!(err, RojoError::ValueOutOfRange { .. }));
    }
}
