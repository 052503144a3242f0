//! # 1-D Barcode Printing
//!
//! 1-D barcodes are printed as graphics: the data is encoded into bars with
//! the barcoders crate, drawn into an image one dot per module, and sent
//! through the raster encoder.
//!
//! ## Type Codes
//!
//! | Codes | Symbology |
//! |-------|-----------|
//! | 0, 1, 65, 66 | UPC-A |
//! | 2, 67 | EAN-13 |
//! | 3, 68 | EAN-8 |
//! | 4, 69 | Code 39 |
//! | 5, 70 | ITF-14 |
//! | 6, 71 | Codabar |
//! | 73, 79, anything else | Code 128 |

use barcoders::sym::codabar::Codabar;
use barcoders::sym::code39::Code39;
use barcoders::sym::code128::Code128;
use barcoders::sym::ean8::EAN8;
use barcoders::sym::ean13::EAN13;
use barcoders::sym::tf::TF;
use image::{Rgba, RgbaImage};
use log::debug;

use crate::error::{Result, RojoError};
use crate::printer::PrinterConfig;
use crate::protocol::graphics::{self, PixelMatrix};

const BAR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const SPACE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Barcode symbology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Symbology {
    Upc,
    Ean13,
    Ean8,
    Code39,
    Itf14,
    Codabar,
    #[default]
    Code128,
}

impl Symbology {
    /// Map a protocol barcode type code. Unknown codes select Code 128.
    pub fn from_type_code(code: u8) -> Self {
        match code {
            0 | 1 | 65 | 66 => Symbology::Upc,
            2 | 67 => Symbology::Ean13,
            3 | 68 => Symbology::Ean8,
            4 | 69 => Symbology::Code39,
            5 | 70 => Symbology::Itf14,
            6 | 71 => Symbology::Codabar,
            _ => Symbology::Code128,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Symbology::Upc => "UPC",
            Symbology::Ean13 => "EAN13",
            Symbology::Ean8 => "EAN8",
            Symbology::Code39 => "CODE39",
            Symbology::Itf14 => "ITF14",
            Symbology::Codabar => "codabar",
            Symbology::Code128 => "CODE128",
        }
    }
}

fn invalid(symbology: Symbology, data: &str, e: impl std::fmt::Debug) -> RojoError {
    RojoError::MalformedInput(format!(
        "cannot encode '{}' as {}: {:?}",
        data,
        symbology.name(),
        e
    ))
}

fn is_codabar_guard(c: char) -> bool {
    matches!(c, 'A'..='D')
}

/// Codabar needs start/stop characters; plain data is framed with `A...A`.
fn codabar_data(data: &str) -> String {
    let data = data.to_ascii_uppercase();
    let framed = data.len() >= 2
        && data.starts_with(is_codabar_guard)
        && data.ends_with(is_codabar_guard);
    if framed { data } else { format!("A{}A", data) }
}

/// Encode `data` into modules: 1 = bar, 0 = space.
pub fn encode_modules(symbology: Symbology, data: &str) -> Result<Vec<u8>> {
    let modules = match symbology {
        // UPC-A is EAN-13 with a leading zero
        Symbology::Upc => EAN13::new(&format!("0{}", data))
            .map(|b| b.encode())
            .map_err(|e| invalid(symbology, data, e))?,
        Symbology::Ean13 => EAN13::new(data)
            .map(|b| b.encode())
            .map_err(|e| invalid(symbology, data, e))?,
        Symbology::Ean8 => EAN8::new(data)
            .map(|b| b.encode())
            .map_err(|e| invalid(symbology, data, e))?,
        Symbology::Code39 => Code39::new(data)
            .map(|b| b.encode())
            .map_err(|e| invalid(symbology, data, e))?,
        Symbology::Itf14 => TF::interleaved(data)
            .map(|b| b.encode())
            .map_err(|e| invalid(symbology, data, e))?,
        Symbology::Codabar => Codabar::new(&codabar_data(data))
            .map(|b| b.encode())
            .map_err(|e| invalid(symbology, data, e))?,
        // Character set B covers the printable ASCII range
        Symbology::Code128 => Code128::new(&format!("\u{0181}{}", data))
            .map(|b| b.encode())
            .map_err(|e| invalid(symbology, data, e))?,
    };
    Ok(modules)
}

/// Draw modules as vertical bars, one dot wide, framed by a white quiet zone.
pub fn render_modules(modules: &[u8], bar_height: u32, quiet_zone: u32) -> RgbaImage {
    let width = modules.len() as u32 + 2 * quiet_zone;
    let height = bar_height + 2 * quiet_zone;
    let mut image = RgbaImage::from_pixel(width, height, SPACE);

    for (i, _) in modules.iter().enumerate().filter(|(_, m)| **m == 1) {
        let x = quiet_zone + i as u32;
        for y in quiet_zone..quiet_zone + bar_height {
            image.put_pixel(x, y, BAR);
        }
    }
    image
}

/// # Print a 1-D Barcode
///
/// `type_code` is mapped with [`Symbology::from_type_code`].
pub fn print_barcode(data: &str, type_code: u8, config: &PrinterConfig) -> Result<Vec<u8>> {
    let symbology = Symbology::from_type_code(type_code);
    let modules = encode_modules(symbology, data)?;
    let image = render_modules(&modules, config.barcode_height, config.barcode_quiet_zone);

    debug!(
        "{} barcode: {} modules, {}x{} image",
        symbology.name(),
        modules.len(),
        image.width(),
        image.height()
    );

    let matrix = PixelMatrix::from_image(&image);
    graphics::raster_image(&matrix, &config.raster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_code_mapping() {
        for code in [0, 1, 65, 66] {
            assert_eq!(Symbology::from_type_code(code), Symbology::Upc);
        }
        assert_eq!(Symbology::from_type_code(2), Symbology::Ean13);
        assert_eq!(Symbology::from_type_code(67), Symbology::Ean13);
        assert_eq!(Symbology::from_type_code(3), Symbology::Ean8);
        assert_eq!(Symbology::from_type_code(68), Symbology::Ean8);
        assert_eq!(Symbology::from_type_code(4), Symbology::Code39);
        assert_eq!(Symbology::from_type_code(69), Symbology::Code39);
        assert_eq!(Symbology::from_type_code(5), Symbology::Itf14);
        assert_eq!(Symbology::from_type_code(70), Symbology::Itf14);
        assert_eq!(Symbology::from_type_code(6), Symbology::Codabar);
        assert_eq!(Symbology::from_type_code(71), Symbology::Codabar);
        assert_eq!(Symbology::from_type_code(73), Symbology::Code128);
        assert_eq!(Symbology::from_type_code(79), Symbology::Code128);
        assert_eq!(Symbology::from_type_code(200), Symbology::Code128);
    }

    #[test]
    fn test_encode_code128() {
        let modules = encode_modules(Symbology::Code128, "Hello").unwrap();
        assert!(!modules.is_empty());
        assert!(modules.iter().all(|&m| m <= 1));
        assert_eq!(modules[0], 1);
    }

    #[test]
    fn test_encode_code39() {
        let modules = encode_modules(Symbology::Code39, "ABC123").unwrap();
        assert!(modules.contains(&1));
    }

    #[test]
    fn test_encode_upc_as_ean13() {
        let upc = encode_modules(Symbology::Upc, "03600029145").unwrap();
        let ean = encode_modules(Symbology::Ean13, "003600029145").unwrap();
        assert_eq!(upc, ean);
    }

    #[test]
    fn test_encode_ean13() {
        let modules = encode_modules(Symbology::Ean13, "750103131130").unwrap();
        // 3 + 6*7 + 5 + 6*7 + 3
        assert_eq!(modules.len(), 95);
        assert_eq!(&modules[0..3], &[1, 0, 1]);
    }

    #[test]
    fn test_encode_itf14() {
        let modules = encode_modules(Symbology::Itf14, "15400141288763").unwrap();
        assert!(modules.contains(&1));
        assert!(modules.iter().all(|&m| m <= 1));
    }

    #[test]
    fn test_codabar_framing() {
        assert_eq!(codabar_data("12345"), "A12345A");
        assert_eq!(codabar_data("b12345c"), "B12345C");
        assert_eq!(codabar_data("A"), "AAA");
    }

    #[test]
    fn test_encode_codabar_without_guards() {
        let plain = encode_modules(Symbology::Codabar, "12345").unwrap();
        let framed = encode_modules(Symbology::Codabar, "A12345A").unwrap();
        assert_eq!(plain, framed);
        assert!(encode_modules(Symbology::Codabar, "B12345D").is_ok());
    }

    #[test]
    fn test_print_codabar() {
        let cmd = print_barcode("12345", 6, &PrinterConfig::SRP350).unwrap();
        assert_eq!(&cmd[0..3], &[0x1B, 0x2A, 0x00]);
    }

    #[test]
    fn test_encode_invalid_data() {
        assert!(matches!(
            encode_modules(Symbology::Ean8, "not digits"),
            Err(RojoError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_render_modules() {
        let image = render_modules(&[1, 0, 1], 4, 2);
        assert_eq!((image.width(), image.height()), (7, 8));
        assert_eq!(*image.get_pixel(2, 2), BAR);
        assert_eq!(*image.get_pixel(3, 2), SPACE);
        assert_eq!(*image.get_pixel(4, 5), BAR);
        // Quiet zone stays white
        assert_eq!(*image.get_pixel(2, 1), SPACE);
        assert_eq!(*image.get_pixel(2, 6), SPACE);
        assert_eq!(*image.get_pixel(0, 3), SPACE);
    }

    #[test]
    fn test_print_barcode() {
        let config = PrinterConfig::SRP350;
        let cmd = print_barcode("12345", 73, &config).unwrap();

        let modules = encode_modules(Symbology::Code128, "12345").unwrap();
        let width = modules.len() + 20;
        // 32 + 20 rows = 52 -> 7 bands
        let band_len = 5 + width + 3;
        assert_eq!(cmd.len(), 7 * band_len);
        assert_eq!(cmd[3] as usize + cmd[4] as usize * 256, width);
    }
}
