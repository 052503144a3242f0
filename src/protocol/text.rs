//! # Text Styling Commands
//!
//! Character size selection. Multipliers are 0-based: 0 = normal size,
//! 7 = eight times.

use super::commands::{CommandBuffer, GS};
use crate::error::{Result, RojoError};

/// Largest multiplier accepted for either axis
pub const MAX_SIZE: u8 = 7;

/// # Select Character Size (GS ! n)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS ! n   |
/// | Hex     | 1D 21 n  |
///
/// `n` carries the height multiplier in the high nibble and the width
/// multiplier in the low nibble. Both must be in `[0, 7]`.
///
/// ## Example
///
/// ```
/// use rojo::protocol::text;
///
/// assert_eq!(text::set_text_size(1, 2).unwrap(), vec![0x1D, 0x21, 0x12]);
/// assert!(text::set_text_size(8, 0).is_err());
/// ```
pub fn set_text_size(height: u8, width: u8) -> Result<Vec<u8>> {
    RojoError::check_range("text height", height as i64, 0, MAX_SIZE as i64)?;
    RojoError::check_range("text width", width as i64, 0, MAX_SIZE as i64)?;

    let mut buf = CommandBuffer::with_capacity(3);
    buf.append(&[GS, b'!', (height << 4) | width]);
    Ok(buf.into_bytes())
}
