//! # Printer Configuration
//!
//! Hardware limits and defaults for supported two-color receipt printers.
//!
//! ## Supported Printers
//!
//! | Model | Max image (dots) | Colors |
//! |-------|------------------|--------|
//! | SRP-350 | 100 x 60 | black, red |
//!
//! ## Usage
//!
//! ```
//! use rojo::printer::PrinterConfig;
//!
//! let config = PrinterConfig::SRP350;
//! println!("Images are constrained to {}x{} dots",
//!          config.max_image_width,
//!          config.max_image_height);
//! ```

use crate::error::{Result, RojoError};
use crate::protocol::graphics::{Density, RasterOptions};
use crate::render::scale::Dimensions;

/// # Printer Configuration
///
/// - **max_image_width / max_image_height**: decoded images larger than this
///   are scaled down (height first) before rasterization
/// - **raster**: options used when printing decoded images and barcodes
/// - **barcode_height / barcode_quiet_zone**: geometry of rendered 1-D barcodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Widest image printed without scaling, in dots
    pub max_image_width: u32,

    /// Tallest image printed without scaling, in dots
    pub max_image_height: u32,

    /// Raster options for image and barcode printing
    pub raster: RasterOptions,

    /// Bar height of rendered 1-D barcodes, in dots
    pub barcode_height: u32,

    /// White margin around rendered 1-D barcodes, in dots
    pub barcode_quiet_zone: u32,
}

impl PrinterConfig {
    /// # SRP-350 Configuration
    ///
    /// 80mm two-color receipt printer.
    pub const SRP350: Self = Self {
        name: "SRP-350",
        max_image_width: 100,
        max_image_height: 60,
        raster: RasterOptions {
            density: Density::Single,
            dot_matrix: false,
            print_red: true,
        },
        barcode_height: 32,
        barcode_quiet_zone: 10,
    };

    /// Look up a built-in configuration by case-insensitive model name.
    ///
    /// ```
    /// use rojo::printer::PrinterConfig;
    ///
    /// assert_eq!(PrinterConfig::by_name("srp350").unwrap(), PrinterConfig::SRP350);
    /// assert!(PrinterConfig::by_name("tm-t88").is_err());
    /// ```
    pub fn by_name(name: &str) -> Result<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "srp350" => Ok(Self::SRP350),
            _ => Err(RojoError::UnknownConfigurationKey {
                setting: "printer",
                key: name.to_string(),
            }),
        }
    }

    /// Replace the image box that decoded images are shrunk into.
    ///
    /// ```
    /// use rojo::printer::PrinterConfig;
    /// use rojo::render::scale::Dimensions;
    ///
    /// let config = PrinterConfig::SRP350.with_image_box(Dimensions::new(384.0, 200.0));
    /// assert_eq!((config.max_image_width, config.max_image_height), (384, 200));
    /// ```
    pub fn with_image_box(mut self, max: Dimensions) -> Self {
        let (width, height) = max.to_pixels();
        self.max_image_width = width;
        self.max_image_height = height;
        self
    }

    /// Names accepted by [`PrinterConfig::by_name`]
    pub fn list() -> &'static [&'static str] {
        &["srp350"]
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::SRP350
    }
}

// ============================================================================
// TESTS
// ============================================================================
