//! # Print Color Selection (ESC r n)
//!
//! Two-color printers hold a red ribbon/paper layer alongside black. The
//! active color applies to everything printed until the next switch.
//!
//! | n        | Color |
//! |----------|-------|
//! | 0, 48    | Black |
//! | 1, 49    | Red   |
//!
//! Any other `n` is ignored: nothing is emitted.

use super::commands::{CommandBuffer, ESC};

/// Print color layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintColor {
    #[default]
    Black,
    Red,
}

impl PrintColor {
    /// Binary mode byte used when switching inside raster output
    pub const fn mode(self) -> u8 {
        match self {
            PrintColor::Black => 0,
            PrintColor::Red => 1,
        }
    }

    /// Map a raw mode byte, accepting both the binary and ASCII forms.
    pub const fn from_mode(mode: u8) -> Option<Self> {
        match mode {
            0 | 48 => Some(PrintColor::Black),
            1 | 49 => Some(PrintColor::Red),
            _ => None,
        }
    }
}

/// # Select Print Color (ESC r n)
///
/// Returns a fresh command. Unknown modes yield an empty command.
///
/// ## Example
///
/// ```
/// use rojo::protocol::color;
///
/// assert_eq!(color::select_print_color(49), vec![0x1B, 0x72, 49]);
/// assert!(color::select_print_color(7).is_empty());
/// ```
pub fn select_print_color(mode: u8) -> Vec<u8> {
    let mut buf = CommandBuffer::new();
    append_print_color(&mut buf, mode);
    buf.into_bytes()
}

/// Append the color switch to an existing buffer without clearing it.
///
/// Returns whether anything was appended. The raster encoder uses this to
/// toggle red on and off between bands.
pub fn append_print_color(buf: &mut CommandBuffer, mode: u8) -> bool {
    if PrintColor::from_mode(mode).is_none() {
        return false;
    }
    buf.append(&[ESC, b'r', mode]);
    true
}

/// Typed convenience for [`append_print_color`]
#[inline]
pub fn switch_to(buf: &mut CommandBuffer, color: PrintColor) {
    buf.append(&[ESC, b'r', color.mode()]);
}
