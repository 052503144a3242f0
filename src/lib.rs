//! # Rojo - Two-Color Thermal Printer Command Encoder
//!
//! Rojo turns print requests into the byte streams understood by red/black
//! thermal receipt printers. It provides:
//!
//! - **Protocol implementation**: text size, color selection, QR Code,
//!   PDF417, MaxiCode and NV image commands
//! - **Raster encoding**: RGBA pixels to 8-dot bit image bands, with
//!   red-band detection and dot-matrix thinning
//! - **Rendering adapters**: PNG decoding with size limits, 1-D barcodes
//!   drawn as graphics
//!
//! Rojo only produces bytes. Sending them to a printer is up to the caller.
//!
//! ## Quick Start
//!
//! ```
//! use rojo::{
//!     protocol::{barcode::qr, color, graphics},
//!     PrinterConfig,
//! };
//!
//! let config = PrinterConfig::SRP350;
//! let mut data = Vec::new();
//!
//! // A 16x16 image whose top half is pure red
//! let mut pixels = Vec::new();
//! for y in 0..16 {
//!     for _ in 0..16 {
//!         pixels.extend(if y < 8 { [255u8, 0, 0, 255] } else { [0, 0, 0, 255] });
//!     }
//! }
//! data.extend(graphics::raster_rgba(16, 16, &pixels, &config.raster)?);
//!
//! data.extend(color::select_print_color(0));
//! data.extend(qr::encode(b"https://example.com", &qr::QrSettings::default())?);
//!
//! // Write `data` to the printer...
//! # Ok::<(), rojo::RojoError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Command builders and the raster encoder |
//! | [`render`] | Image and barcode adapters |
//! | [`printer`] | Printer configurations |
//! | [`error`] | Error types |

pub mod error;
pub mod printer;
pub mod protocol;
pub mod render;

// Re-exports for convenience
pub use error::{Result, RojoError};
pub use printer::PrinterConfig;
