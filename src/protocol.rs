//! Teleinfo wire constants.
//!
//! A frame looks like:
//!
//! ```text
//! STX  LF ADCO 270622224349 B CR  LF OPTARIF HC.. < CR  ...  ETX
//! 0x02 0x0A                   0x0D                          0x03
//! ```
//!
//! Every line carries a label, a space, a value, a space and a one byte checksum.

/// Start of a frame (`STX`).
pub const FRAME_START: u8 = 0x02;

/// End of a frame (`ETX`).
pub const FRAME_END: u8 = 0x03;

/// Start of a line (`LF`).
pub const LINE_START: u8 = 0x0A;

/// End of a line (`CR`).
pub const LINE_END: u8 = 0x0D;

/// Separator between label, value and checksum.
pub const SEPARATOR: u8 = b' ';

/// Added to the masked sum to keep the checksum printable.
pub const CHECKSUM_OFFSET: u8 = 0x20;

/// Applied to the sum of a line's bytes.
pub const CHECKSUM_MASK: u8 = 0x3F;

/// The meter transmits 7 bit characters. The parity bit must be dropped on read.
pub const SEVEN_BIT_MASK: u8 = 0x7F;

/// Maximum number of bytes read after [`FRAME_START`] before a frame is abandoned.
pub const MAX_FRAME_LEN: usize = 280;

/// Maximum size of a line, [`LINE_START`] and [`LINE_END`] included.
pub const MAX_LINE_LEN: usize = 21;

/// Maximum size of a line's content, between [`LINE_START`] and [`LINE_END`].
pub const MAX_LINE_CONTENT_LEN: usize = MAX_LINE_LEN - 2;

/// Number of lines a frame carries in the off-peak/peak tariff scheme.
pub const LINES_PER_FRAME: usize = 11;
