//! # Protocol Primitives
//!
//! Shared building blocks for every command builder in [`crate::protocol`]:
//! the escape bytes, the two-byte length/dimension encoding, and the
//! append-only [`CommandBuffer`].
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Fixed: `ESC J n`, `ESC r n`, `GS ! n`
//! - Block: `ESC * m nL nH d1...dk`, `GS ( k pL pH cn fn ...`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - value 0x1234 is sent as bytes `[0x34, 0x12]`

use crate::error::{Result, RojoError};

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size, 2-D symbols (`GS ( k`) and status commands.
pub const GS: u8 = 0x1D;

/// FS (File Separator) - NV image command prefix
pub const FS: u8 = 0x1C;

/// Dots fed by the line feed that closes each raster band
pub const BAND_FEED_DOTS: u8 = 0x10;

// ============================================================================
// TWO-BYTE VALUES
// ============================================================================

/// A 16-bit quantity split into its wire bytes, low byte first.
///
/// Every length and dimension field in the protocol goes through
/// [`TwoByte::encode`]; builders never split integers by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoByte {
    pub low: u8,
    pub high: u8,
}

impl TwoByte {
    /// Smallest accepted input (negative values wrap to 16 bits)
    pub const MIN: i64 = -32768;
    /// Largest accepted input
    pub const MAX: i64 = 65535;

    /// Split `n` into `{low, high}` such that `n == high * 256 + low`.
    ///
    /// Values in `[-32768, -1]` are mapped through 16-bit wraparound
    /// (`n + 65536`) first. Anything outside `[-32768, 65535]` is a
    /// `ValueOutOfRange` error.
    ///
    /// ## Example
    ///
    /// ```
    /// use rojo::protocol::commands::TwoByte;
    ///
    /// let v = TwoByte::encode(576).unwrap();
    /// assert_eq!((v.low, v.high), (0x40, 0x02));
    ///
    /// let v = TwoByte::encode(-1).unwrap();
    /// assert_eq!((v.low, v.high), (0xFF, 0xFF));
    /// ```
    pub fn encode(n: i64) -> Result<Self> {
        RojoError::check_range("two-byte value", n, Self::MIN, Self::MAX)?;
        let unsigned = if n < 0 { n + 65536 } else { n };
        Ok(Self {
            low: (unsigned % 256) as u8,
            high: (unsigned / 256) as u8,
        })
    }

    /// Encode a length or count. Fails for anything above 65535.
    pub fn from_len(len: usize) -> Result<Self> {
        let n = i64::try_from(len)
            .map_err(|_| RojoError::out_of_range("length", i64::MAX, 0, Self::MAX))?;
        RojoError::check_range("length", n, 0, Self::MAX)?;
        Self::encode(n)
    }

    /// Wire order: `[low, high]`
    #[inline]
    pub const fn bytes(self) -> [u8; 2] {
        [self.low, self.high]
    }

    /// Reassemble the unsigned 16-bit value
    #[inline]
    pub const fn value(self) -> u16 {
        self.high as u16 * 256 + self.low as u16
    }
}

// ============================================================================
// COMMAND BUFFER
// ============================================================================

/// Append-only byte accumulator used while assembling one command.
///
/// Every public builder creates its own buffer, appends, and hands back the
/// owned bytes, so no state survives between calls. Builders that need to
/// emit into an existing stream (the color switch inside raster encoding)
/// take `&mut CommandBuffer` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBuffer {
    bytes: Vec<u8>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Concatenate `bytes` onto the current content.
    #[inline]
    pub fn append(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Discard everything appended so far.
    #[inline]
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    /// Current content
    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the buffer, returning the accumulated command bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<CommandBuffer> for Vec<u8> {
    fn from(buffer: CommandBuffer) -> Self {
        buffer.into_bytes()
    }
}

// ============================================================================
// PAPER FEED
// ============================================================================

/// # Band Feed (ESC J 16)
///
/// Prints the line buffer and feeds 16 dots, which advances exactly one
/// 8-dot band at double vertical resolution.
///
/// | Format  | Bytes     |
/// |---------|-----------|
/// | ASCII   | ESC J 16  |
/// | Hex     | 1B 4A 10  |
#[inline]
pub fn band_feed() -> [u8; 3] {
    [ESC, b'J', BAND_FEED_DOTS]
}

// ============================================================================
// TESTS
// ============================================================================
