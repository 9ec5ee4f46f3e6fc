//! Decoding errors.

/// An error that abandons the frame being decoded.
///
/// All variants are recoverable: the in-progress frame is discarded, the committed
/// [`MeterSnapshot`](crate::MeterSnapshot) is left untouched and decoding resumes at the next frame start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// A line's computed checksum does not match its trailing byte, or the line is too short to carry one.
    Checksum,
    /// A line's label is not one of the labels expected at its position in the frame.
    Sequence {
        /// The 1-based position of the offending line.
        position: usize,
    },
    /// The frame or one of its lines exceeded its maximum length.
    Overflow,
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Checksum => write!(f, "Checksum error"),
            Self::Sequence { position } => write!(f, "Sequence error at position {}", position),
            Self::Overflow => write!(f, "Overflow error"),
        }
    }
}

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}
