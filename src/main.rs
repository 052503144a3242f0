//! # Rojo CLI
//!
//! Command-line front end that writes printer command bytes to a file or
//! to stdout.
//!
//! ## Usage
//!
//! ```bash
//! # QR Code with custom settings, piped to the printer
//! rojo qr "https://example.com" --settings '{"cellSize":"6","correction":"H"}' > /dev/usb/lp0
//!
//! # PDF417 written to a file
//! rojo pdf417 "ORDER 1234" --settings '{"columns":4}' --output order.bin
//!
//! # PNG logo, scaled to the printer's image box or a custom one
//! rojo image logo.png --output logo.bin
//! rojo image logo.png --size '{"width":200,"height":120}'
//!
//! # Supported printer models
//! rojo printers
//!
//! # Code 128 barcode
//! rojo barcode "RECEIPT-0042" --type 73
//!
//! # Switch to red, double-height text
//! rojo color 1
//! rojo text-size 1 0
//!
//! # Define NV graphics
//! rojo nv-define logo.png stamp.png --output nv.bin
//! ```
//!
//! Set `RUST_LOG=debug` to see encoder diagnostics on stderr.

use clap::{Parser, Subcommand};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

use rojo::{
    PrinterConfig, RojoError,
    protocol::{
        barcode::{maxicode, pdf417, qr},
        color,
        graphics::{PixelMatrix, RasterOptions},
        nv_graphics, text,
    },
    render::{self, image::FileType, scale::Dimensions},
};

/// Rojo - Red/black thermal printer command encoder
#[derive(Parser, Debug)]
#[command(name = "rojo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Write commands to FILE instead of stdout
    #[arg(long, short, global = true, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Printer model
    #[arg(long, global = true, default_value = "srp350")]
    printer: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a QR Code
    Qr {
        data: String,

        /// QR settings as JSON, e.g. '{"model":2,"cellSize":"4","correction":"M"}'
        #[arg(long, value_name = "JSON")]
        settings: Option<String>,
    },

    /// Encode a PDF417 symbol
    Pdf417 {
        data: String,

        /// PDF417 settings as JSON, e.g. '{"rowHeight":3,"columns":0}'
        #[arg(long, value_name = "JSON")]
        settings: Option<String>,
    },

    /// Encode a MaxiCode symbol
    Maxicode {
        data: String,

        /// MaxiCode settings as JSON, e.g. '{"mode":4}'
        #[arg(long, value_name = "JSON")]
        settings: Option<String>,
    },

    /// Rasterize an image file
    Image {
        path: PathBuf,

        /// Input file type (png, bmp)
        #[arg(long, default_value = "png")]
        filetype: String,

        /// Raster options as JSON, e.g. '{"density":1,"dotMatrix":true}'
        #[arg(long, value_name = "JSON")]
        settings: Option<String>,

        /// Image box as JSON, e.g. '{"width":200,"height":120}' (defaults to the printer's)
        #[arg(long, value_name = "JSON")]
        size: Option<String>,
    },

    /// Print a 1-D barcode as graphics
    Barcode {
        data: String,

        /// Barcode type code (73 = Code 128)
        #[arg(long = "type", default_value = "73")]
        type_code: u8,
    },

    /// Select print color (0/48 black, 1/49 red)
    Color { mode: u8 },

    /// Set character size multipliers (0-7 each)
    TextSize { height: u8, width: u8 },

    /// Define NV graphics from PNG files
    NvDefine {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List supported printer models
    Printers,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), RojoError> {
    let cli = Cli::parse();
    let mut config = PrinterConfig::by_name(&cli.printer)?;

    let data = match cli.command {
        Commands::Qr { data, settings } => {
            let settings = match settings {
                Some(json) => qr::QrSettings::from_json(&json)?,
                None => qr::QrSettings::default(),
            };
            qr::encode(data.as_bytes(), &settings)?
        }
        Commands::Pdf417 { data, settings } => {
            let settings = match settings {
                Some(json) => pdf417::Pdf417Settings::from_json(&json)?,
                None => pdf417::Pdf417Settings::default(),
            };
            pdf417::encode(data.as_bytes(), &settings)?
        }
        Commands::Maxicode { data, settings } => {
            let settings = match settings {
                Some(json) => maxicode::MaxiCodeSettings::from_json(&json)?,
                None => maxicode::MaxiCodeSettings::default(),
            };
            maxicode::encode(data.as_bytes(), &settings)?
        }
        Commands::Image {
            path,
            filetype,
            settings,
            size,
        } => {
            let filetype: FileType = filetype.parse()?;
            if let Some(json) = size {
                config = config.with_image_box(Dimensions::from_json(&json)?);
            }
            if let Some(json) = settings {
                config.raster = RasterOptions::from_json(&json)?;
            }
            let bytes = std::fs::read(&path)?;
            render::image::print_image(&bytes, filetype, &config)?
        }
        Commands::Barcode { data, type_code } => {
            render::barcode::print_barcode(&data, type_code, &config)?
        }
        Commands::Color { mode } => {
            let cmd = color::select_print_color(mode);
            if cmd.is_empty() {
                return Err(RojoError::UnknownConfigurationKey {
                    setting: "color mode",
                    key: mode.to_string(),
                });
            }
            cmd
        }
        Commands::TextSize { height, width } => text::set_text_size(height, width)?,
        Commands::NvDefine { paths } => {
            let images = paths
                .iter()
                .map(|p| load_matrix(p))
                .collect::<Result<Vec<_>, _>>()?;
            nv_graphics::define_nv_images(&images)?
        }
        Commands::Printers => {
            println!("Available printers:");
            for name in PrinterConfig::list() {
                println!("  {}", name);
            }
            return Ok(());
        }
    };

    info!("{}: {} bytes", config.name, data.len());
    write_output(cli.output.as_deref(), &data)
}

fn load_matrix(path: &Path) -> Result<PixelMatrix, RojoError> {
    let bytes = std::fs::read(path)?;
    let image = render::image::decode_png(&bytes)?;
    Ok(PixelMatrix::from_image(&image.to_rgba8()))
}

fn write_output(path: Option<&Path>, data: &[u8]) -> Result<(), RojoError> {
    match path {
        Some(path) => {
            std::fs::write(path, data)?;
            println!("Wrote {} bytes to {}", data.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
