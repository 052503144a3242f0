//! # Rendering Module
//!
//! Adapters that turn external content into pixels for the raster encoder.
//!
//! ## Modules
//!
//! - [`scale`]: Aspect-preserving dimension scaling
//! - [`image`]: PNG decoding, size constraining and rasterization
//! - [`barcode`]: 1-D barcodes rendered as graphics
//!
//! ## Usage Example
//!
//! ```
//! use rojo::printer::PrinterConfig;
//! use rojo::render::barcode;
//!
//! // Code 128 (type code 73), drawn and rasterized
//! let data = barcode::print_barcode("RECEIPT-0042", 73, &PrinterConfig::SRP350)?;
//! assert!(!data.is_empty());
//! # Ok::<(), rojo::RojoError>(())
//! ```

pub mod barcode;
pub mod image;
pub mod scale;
