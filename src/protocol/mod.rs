//! # Printer Command Protocol
//!
//! Low-level command builders for two-color (red/black) thermal receipt
//! printers speaking the ESC/POS-style command set.
//!
//! ## Module Structure
//!
//! - [`commands`]: Escape bytes, two-byte values, the command buffer, feeds
//! - [`color`]: Red/black print color selection
//! - [`text`]: Character size
//! - [`graphics`]: 8-dot bit image raster encoding
//! - [`barcode`]: QR Code, PDF417 and MaxiCode
//! - [`nv_graphics`]: Images stored in non-volatile memory
//!
//! Every builder returns an owned `Vec<u8>`; nothing is shared between calls.
//!
//! ## Usage Example
//!
//! ```
//! use rojo::protocol::{barcode::qr, graphics, text};
//!
//! let mut data = Vec::new();
//! data.extend(text::set_text_size(1, 1)?);
//! data.extend(qr::encode(b"https://example.com", &qr::QrSettings::default())?);
//!
//! let pixels = [0u8, 0, 0, 255].repeat(16 * 16);
//! data.extend(graphics::raster_rgba(16, 16, &pixels, &graphics::RasterOptions::default())?);
//! # Ok::<(), rojo::RojoError>(())
//! ```

pub mod barcode;
pub mod color;
pub mod commands;
pub mod graphics;
pub mod nv_graphics;
pub mod text;
