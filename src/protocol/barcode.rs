//! # 2-D Symbol Commands (GS ( k)
//!
//! QR Code, PDF417 and MaxiCode share one command family:
//!
//! ```text
//! GS ( k pL pH cn fn [parameters]
//! ```
//!
//! - `cn` selects the symbology: 0x30 = PDF417, 0x31 = QR, 0x32 = MaxiCode
//! - `fn` selects the function: set a parameter, store data, print
//!
//! Every symbol is built the same way:
//!
//! 1. Parameter sub-commands (model, size, error correction, ...)
//! 2. Store data: `GS ( k pL pH cn 0x50 0x30 d1...dk`, where
//!    `pL + pH * 256 = k + 3`
//! 3. Print: `GS ( k 03 00 cn 0x51 0x30`
//!
//! ## Usage
//!
//! ```
//! use rojo::protocol::barcode::{qr, pdf417, maxicode};
//!
//! let mut data = Vec::new();
//! data.extend(qr::encode(b"https://example.com", &qr::QrSettings::default()).unwrap());
//! data.extend(pdf417::encode(b"Hello, PDF417!", &pdf417::Pdf417Settings::default()).unwrap());
//! data.extend(maxicode::encode(b"MAXI", &maxicode::MaxiCodeSettings::default()).unwrap());
//! ```

use std::fmt;

use serde::Deserialize;

use super::commands::{CommandBuffer, GS, TwoByte};
use crate::error::{Result, RojoError};

/// `cn` byte for PDF417
pub const CN_PDF417: u8 = 0x30;
/// `cn` byte for QR Code
pub const CN_QR: u8 = 0x31;
/// `cn` byte for MaxiCode
pub const CN_MAXICODE: u8 = 0x32;

/// `GS ( k` prefix with a fixed 3-byte parameter block
#[inline]
fn param(cn: u8, fn_: u8, n: u8) -> [u8; 8] {
    [GS, b'(', b'k', 0x03, 0x00, cn, fn_, n]
}

/// # Store Symbol Data (GS ( k pL pH cn 0x50 0x30 d1...dk)
///
/// Appends the length-prefixed data block for symbology `cn`.
fn append_store(buf: &mut CommandBuffer, cn: u8, data: &[u8]) -> Result<()> {
    let len = data
        .len()
        .checked_add(3)
        .ok_or_else(|| RojoError::out_of_range("symbol data length", i64::MAX, 0, 65532))?;
    let [pl, ph] = TwoByte::from_len(len)?.bytes();
    buf.append(&[GS, b'(', b'k', pl, ph, cn, 0x50, 0x30]);
    buf.append(data);
    Ok(())
}

/// # Print Stored Symbol (GS ( k 03 00 cn 0x51 0x30)
#[inline]
fn print_command(cn: u8) -> [u8; 8] {
    param(cn, 0x51, 0x30)
}

/// A loosely-typed settings value as it appears in JSON: `3`, `"3"` or `true`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum SettingValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl SettingValue {
    /// Truthiness of an on/off option: `0`, `false` and `""` are off.
    fn is_set(&self) -> bool {
        match self {
            SettingValue::Flag(b) => *b,
            SettingValue::Number(n) => *n != 0,
            SettingValue::Text(s) => !s.is_empty(),
        }
    }

    fn as_number(&self, field: &'static str) -> Result<i64> {
        match self {
            SettingValue::Flag(b) => Ok(*b as i64),
            SettingValue::Number(n) => Ok(*n),
            SettingValue::Text(s) => {
                s.trim()
                    .parse()
                    .map_err(|_| RojoError::UnknownConfigurationKey {
                        setting: field,
                        key: s.clone(),
                    })
            }
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Flag(b) => write!(f, "{}", b),
            SettingValue::Number(n) => write!(f, "{}", n),
            SettingValue::Text(s) => f.write_str(s),
        }
    }
}

fn settings_error(kind: &str, e: serde_json::Error) -> RojoError {
    RojoError::MalformedInput(format!("{} settings: {}", kind, e))
}

// ============================================================================
// QR CODE
// ============================================================================

/// QR Code command builders
pub mod qr {
    use std::str::FromStr;

    use log::{debug, warn};
    use serde::Deserialize;

    use super::{CN_QR, CommandBuffer, SettingValue, append_store, param, print_command};
    use crate::error::{Result, RojoError};

    /// QR Code model
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum QrModel {
        /// Original QR Code
        Model1,
        /// Enhanced QR Code with alignment patterns
        #[default]
        Model2,
    }

    impl QrModel {
        const fn byte(self) -> u8 {
            match self {
                QrModel::Model1 => 0x31,
                QrModel::Model2 => 0x32,
            }
        }
    }

    impl From<i64> for QrModel {
        fn from(value: i64) -> Self {
            match value {
                1 => QrModel::Model1,
                2 => QrModel::Model2,
                other => {
                    warn!("QR model {} not supported, using model 2", other);
                    QrModel::Model2
                }
            }
        }
    }

    /// Module (cell) size in dots
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum QrCellSize {
        Dots1,
        Dots2,
        #[default]
        Dots3,
        Dots4,
        Dots5,
        Dots6,
        Dots7,
        Dots8,
    }

    impl QrCellSize {
        pub const fn dots(self) -> u8 {
            match self {
                QrCellSize::Dots1 => 1,
                QrCellSize::Dots2 => 2,
                QrCellSize::Dots3 => 3,
                QrCellSize::Dots4 => 4,
                QrCellSize::Dots5 => 5,
                QrCellSize::Dots6 => 6,
                QrCellSize::Dots7 => 7,
                QrCellSize::Dots8 => 8,
            }
        }
    }

    impl FromStr for QrCellSize {
        type Err = RojoError;

        fn from_str(s: &str) -> Result<Self> {
            match s.trim() {
                "1" => Ok(QrCellSize::Dots1),
                "2" => Ok(QrCellSize::Dots2),
                "3" => Ok(QrCellSize::Dots3),
                "4" => Ok(QrCellSize::Dots4),
                "5" => Ok(QrCellSize::Dots5),
                "6" => Ok(QrCellSize::Dots6),
                "7" => Ok(QrCellSize::Dots7),
                "8" => Ok(QrCellSize::Dots8),
                _ => Err(RojoError::UnknownConfigurationKey {
                    setting: "cellSize",
                    key: s.to_string(),
                }),
            }
        }
    }

    /// Error correction level
    ///
    /// | Level | Recovery |
    /// |-------|----------|
    /// | L | ~7% |
    /// | M | ~15% |
    /// | Q | ~25% |
    /// | H | ~30% |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum QrCorrection {
        L,
        #[default]
        M,
        Q,
        H,
    }

    impl QrCorrection {
        const fn byte(self) -> u8 {
            match self {
                QrCorrection::L => 0x30,
                QrCorrection::M => 0x31,
                QrCorrection::Q => 0x32,
                QrCorrection::H => 0x33,
            }
        }
    }

    impl FromStr for QrCorrection {
        type Err = RojoError;

        /// Case-insensitive: `"h"` and `"H"` both select level H.
        fn from_str(s: &str) -> Result<Self> {
            match s.trim().to_ascii_uppercase().as_str() {
                "L" => Ok(QrCorrection::L),
                "M" => Ok(QrCorrection::M),
                "Q" => Ok(QrCorrection::Q),
                "H" => Ok(QrCorrection::H),
                _ => Err(RojoError::UnknownConfigurationKey {
                    setting: "correction",
                    key: s.to_string(),
                }),
            }
        }
    }

    /// QR settings; every field has a default
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct QrSettings {
        pub model: QrModel,
        pub cell_size: QrCellSize,
        pub correction: QrCorrection,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    struct RawQrSettings {
        model: Option<SettingValue>,
        cell_size: Option<SettingValue>,
        correction: Option<SettingValue>,
    }

    impl QrSettings {
        /// Parse `{"model": 1|2, "cellSize": "1".."8", "correction": "L"|"M"|"Q"|"H"}`.
        ///
        /// Unrecognized keys are ignored. An unknown cell size or correction
        /// level is an `UnknownConfigurationKey` error.
        pub fn from_json(json: &str) -> Result<Self> {
            let raw: RawQrSettings =
                serde_json::from_str(json).map_err(|e| super::settings_error("QR", e))?;

            let mut settings = QrSettings::default();
            if let Some(model) = raw.model {
                settings.model = QrModel::from(model.as_number("model")?);
            }
            if let Some(size) = raw.cell_size {
                settings.cell_size = size.to_string().parse()?;
            }
            if let Some(correction) = raw.correction {
                settings.correction = correction.to_string().parse()?;
            }
            Ok(settings)
        }

        pub fn model(mut self, model: QrModel) -> Self {
            self.model = model;
            self
        }

        pub fn cell_size(mut self, size: QrCellSize) -> Self {
            self.cell_size = size;
            self
        }

        pub fn correction(mut self, level: QrCorrection) -> Self {
            self.correction = level;
            self
        }
    }

    /// # Select Model (GS ( k 04 00 31 41 n1 n2)
    pub fn set_model(model: QrModel) -> [u8; 9] {
        [super::GS, b'(', b'k', 0x04, 0x00, CN_QR, 0x41, model.byte(), 0x00]
    }

    /// # Set Module Size (GS ( k 03 00 31 43 n)
    pub fn set_cell_size(size: QrCellSize) -> [u8; 8] {
        param(CN_QR, 0x43, size.dots())
    }

    /// # Select Error Correction (GS ( k 03 00 31 45 n)
    pub fn set_correction(level: QrCorrection) -> [u8; 8] {
        param(CN_QR, 0x45, level.byte())
    }

    /// # Print QR Code (GS ( k 03 00 31 51 30)
    pub fn print() -> [u8; 8] {
        print_command(CN_QR)
    }

    /// Full QR sequence: model, cell size, correction, store data, print.
    ///
    /// ## Example
    ///
    /// ```
    /// use rojo::protocol::barcode::qr::{self, QrSettings};
    ///
    /// let cmd = qr::encode(b"hi", &QrSettings::default()).unwrap();
    /// // Store block: pL = 2 + 3
    /// assert_eq!(&cmd[25..33], &[0x1D, 0x28, 0x6B, 5, 0, 0x31, 0x50, 0x30]);
    /// ```
    pub fn encode(data: &[u8], settings: &QrSettings) -> Result<Vec<u8>> {
        let mut buf = CommandBuffer::with_capacity(41 + data.len());
        buf.append(&set_model(settings.model));
        buf.append(&set_cell_size(settings.cell_size));
        buf.append(&set_correction(settings.correction));
        append_store(&mut buf, CN_QR, data)?;
        buf.append(&print());

        debug!(
            "QR {:?}/{:?}/{:?} with {} data bytes",
            settings.model,
            settings.cell_size,
            settings.correction,
            data.len()
        );
        Ok(buf.into_bytes())
    }
}

// ============================================================================
// PDF417
// ============================================================================

/// PDF417 command builders
pub mod pdf417 {
    use log::debug;
    use serde::Deserialize;

    use super::{CN_PDF417, CommandBuffer, GS, SettingValue, append_store, param, print_command};
    use crate::error::{Result, RojoError};

    /// Error correction ratio range
    pub const CORRECTION_RANGE: (u8, u8) = (1, 40);
    /// Row height range (in module widths)
    pub const ROW_HEIGHT_RANGE: (u8, u8) = (2, 8);
    /// Module width range (in dots)
    pub const WIDTH_RANGE: (u8, u8) = (2, 8);
    /// Column count range; 0 additionally means automatic
    pub const COLUMNS_RANGE: (u8, u8) = (1, 30);

    /// PDF417 settings
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Pdf417Settings {
        /// Error correction ratio, 1-40
        pub correction: u8,
        /// Row height, 2-8
        pub row_height: u8,
        /// Module width, 2-8
        pub width: u8,
        /// Columns, 1-30, or 0 for automatic
        pub columns: u8,
        /// Truncated symbol (omits right-side row indicators)
        pub truncated: bool,
    }

    impl Default for Pdf417Settings {
        fn default() -> Self {
            Self {
                correction: 1,
                row_height: 3,
                width: 3,
                columns: 0,
                truncated: false,
            }
        }
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    struct RawPdf417Settings {
        correction: Option<SettingValue>,
        row_height: Option<SettingValue>,
        width: Option<SettingValue>,
        columns: Option<SettingValue>,
        truncated: Option<SettingValue>,
    }

    fn field(value: Option<SettingValue>, name: &'static str, default: u8) -> Result<u8> {
        match value {
            None => Ok(default),
            Some(v) => {
                let n = v.as_number(name)?;
                RojoError::check_range(name, n, 0, u8::MAX as i64)?;
                Ok(n as u8)
            }
        }
    }

    impl Pdf417Settings {
        /// Parse `{"correction", "rowHeight", "width", "columns", "truncated"}`
        /// and validate every field.
        pub fn from_json(json: &str) -> Result<Self> {
            let raw: RawPdf417Settings =
                serde_json::from_str(json).map_err(|e| super::settings_error("PDF417", e))?;
            let defaults = Self::default();
            let settings = Self {
                correction: field(raw.correction, "correction", defaults.correction)?,
                row_height: field(raw.row_height, "rowHeight", defaults.row_height)?,
                width: field(raw.width, "width", defaults.width)?,
                columns: field(raw.columns, "columns", defaults.columns)?,
                truncated: raw.truncated.is_some_and(|v| v.is_set()),
            };
            settings.validate()?;
            Ok(settings)
        }

        /// Check every field against its documented range.
        pub fn validate(&self) -> Result<()> {
            let check = |name, value: u8, (min, max): (u8, u8)| {
                RojoError::check_range(name, value as i64, min as i64, max as i64)
            };
            check("correction", self.correction, CORRECTION_RANGE)?;
            check("rowHeight", self.row_height, ROW_HEIGHT_RANGE)?;
            check("width", self.width, WIDTH_RANGE)?;
            if self.columns != 0 {
                check("columns", self.columns, COLUMNS_RANGE)?;
            }
            Ok(())
        }
    }

    /// # Set Error Correction Ratio (GS ( k 04 00 30 45 31 n)
    pub fn set_correction(ratio: u8) -> [u8; 9] {
        [GS, b'(', b'k', 0x04, 0x00, CN_PDF417, 0x45, 0x31, ratio]
    }

    /// # Set Row Height (GS ( k 03 00 30 44 n)
    pub fn set_row_height(height: u8) -> [u8; 8] {
        param(CN_PDF417, 0x44, height)
    }

    /// # Set Module Width (GS ( k 03 00 30 43 n)
    pub fn set_width(width: u8) -> [u8; 8] {
        param(CN_PDF417, 0x43, width)
    }

    /// # Set Columns (GS ( k 03 00 30 41 n)
    pub fn set_columns(columns: u8) -> [u8; 8] {
        param(CN_PDF417, 0x41, columns)
    }

    /// # Select Standard/Truncated (GS ( k 03 00 30 46 n)
    pub fn set_truncated(truncated: bool) -> [u8; 8] {
        param(CN_PDF417, 0x46, truncated as u8)
    }

    /// # Print PDF417 (GS ( k 03 00 30 51 30)
    pub fn print() -> [u8; 8] {
        print_command(CN_PDF417)
    }

    /// Full PDF417 sequence. Settings are validated before anything is emitted.
    ///
    /// Order: correction, row height, module width, columns, option, store, print.
    pub fn encode(data: &[u8], settings: &Pdf417Settings) -> Result<Vec<u8>> {
        settings.validate()?;

        let mut buf = CommandBuffer::with_capacity(65 + data.len());
        buf.append(&set_correction(settings.correction));
        buf.append(&set_row_height(settings.row_height));
        buf.append(&set_width(settings.width));
        buf.append(&set_columns(settings.columns));
        buf.append(&set_truncated(settings.truncated));
        append_store(&mut buf, CN_PDF417, data)?;
        buf.append(&print());

        debug!("PDF417 {:?} with {} data bytes", settings, data.len());
        Ok(buf.into_bytes())
    }
}

// ============================================================================
// MAXICODE
// ============================================================================

/// MaxiCode command builders
pub mod maxicode {
    use log::{debug, warn};
    use serde::Deserialize;

    use super::{CN_MAXICODE, CommandBuffer, SettingValue, append_store, param, print_command};
    use crate::error::Result;

    /// MaxiCode mode
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum MaxiMode {
        /// Structured carrier message, numeric postal code (US)
        Mode2,
        /// Structured carrier message, alphanumeric postal code (international)
        Mode3,
        /// Standard error correction
        #[default]
        Mode4,
        /// Enhanced error correction
        Mode5,
        /// Reader programming
        Mode6,
    }

    impl MaxiMode {
        pub const fn number(self) -> u8 {
            match self {
                MaxiMode::Mode2 => 2,
                MaxiMode::Mode3 => 3,
                MaxiMode::Mode4 => 4,
                MaxiMode::Mode5 => 5,
                MaxiMode::Mode6 => 6,
            }
        }
    }

    impl From<i64> for MaxiMode {
        fn from(value: i64) -> Self {
            match value {
                2 => MaxiMode::Mode2,
                3 => MaxiMode::Mode3,
                4 => MaxiMode::Mode4,
                5 => MaxiMode::Mode5,
                6 => MaxiMode::Mode6,
                other => {
                    warn!("MaxiCode mode {} not supported, using mode 4", other);
                    MaxiMode::Mode4
                }
            }
        }
    }

    /// MaxiCode settings
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MaxiCodeSettings {
        pub mode: MaxiMode,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct RawMaxiCodeSettings {
        mode: Option<SettingValue>,
    }

    impl MaxiCodeSettings {
        /// Parse `{"mode": 2..6}`. Any other mode falls back to mode 4.
        pub fn from_json(json: &str) -> Result<Self> {
            let raw: RawMaxiCodeSettings =
                serde_json::from_str(json).map_err(|e| super::settings_error("MaxiCode", e))?;
            let mode = match raw.mode {
                Some(v) => MaxiMode::from(v.as_number("mode")?),
                None => MaxiMode::default(),
            };
            Ok(Self { mode })
        }
    }

    /// # Select Mode (GS ( k 03 00 32 41 n)
    pub fn set_mode(mode: MaxiMode) -> [u8; 8] {
        param(CN_MAXICODE, 0x41, 0x30 + mode.number())
    }

    /// # Print MaxiCode (GS ( k 03 00 32 51 30)
    pub fn print() -> [u8; 8] {
        print_command(CN_MAXICODE)
    }

    /// Full MaxiCode sequence: mode, store data, print.
    pub fn encode(data: &[u8], settings: &MaxiCodeSettings) -> Result<Vec<u8>> {
        let mut buf = CommandBuffer::with_capacity(24 + data.len());
        buf.append(&set_mode(settings.mode));
        append_store(&mut buf, CN_MAXICODE, data)?;
        buf.append(&print());

        debug!("MaxiCode {:?} with {} data bytes", settings.mode, data.len());
        Ok(buf.into_bytes())
    }
}

// ============================================================================
// TESTS
// ============================================================================
