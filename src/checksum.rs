//! Line checksum.

use crate::{
    error::DecodeError,
    logging::warn,
    protocol::{CHECKSUM_MASK, CHECKSUM_OFFSET},
};

/// Computes the checksum of a line's `content`.
///
/// `content` is everything between the line start and the line end: label, separator, value,
/// separator and checksum byte. The sum covers `content[..len - 2]`, leaving out the trailing
/// separator and the checksum byte itself.
///
/// Returns `None` if `content` is too short to hold at least one label byte, a separator and a checksum byte.
pub fn checksum(content: &[u8]) -> Option<u8> {
    if content.len() < 3 {
        return None;
    }

    let sum = content[..content.len() - 2]
        .iter()
        .fold(0_u8, |acc, &b| acc.wrapping_add(b));

    Some((sum & CHECKSUM_MASK) + CHECKSUM_OFFSET)
}

/// Checks the trailing checksum byte of a line's `content`.
pub fn verify(content: &[u8]) -> Result<(), DecodeError> {
    let (Some(expected), Some(&found)) = (checksum(content), content.last()) else {
        warn!("Line too short to carry a checksum. len: {}", content.len());

        return Err(DecodeError::Checksum);
    };

    if expected != found {
        warn!("Checksum mismatch. expected: {}, found: {}", expected, found);

        return Err(DecodeError::Checksum);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reference_lines() {
        let lines: &[&[u8]] = &[
            b"ADCO 270622224349 B",
            b"OPTARIF HC.. <",
            b"ISOUSC 30 9",
            b"HCHC 014460852 $",
            b"HCHP 012506372 -",
            b"PTEC HP..  ",
            b"IINST 002 Y",
            b"IMAX 035 G",
            b"PAPP 00520 (",
            b"HHPHC C .",
            b"MOTDETAT 000000 B",
        ];

        for line in lines {
            assert_eq!(checksum(line), line.last().copied());
            assert!(verify(line).is_ok());
        }
    }

    #[test]
    fn sum_wraps_before_masking() {
        // 0x7F * 3 overflows a u8. Only the low 6 bits matter.
        let content = [0x7F, 0x7F, 0x7F, b' ', 0];
        let sum = (0x7F_u32 * 3) as u8;

        assert_eq!(checksum(&content), Some((sum & 0x3F) + 0x20));
    }

    #[test]
    fn short_lines_never_index_out_of_bounds() {
        assert_eq!(checksum(b""), None);
        assert_eq!(checksum(b"A"), None);
        assert_eq!(checksum(b"A "), None);
        assert_eq!(checksum(b"A Q"), Some((b'A' & 0x3F) + 0x20));

        assert_eq!(verify(b""), Err(DecodeError::Checksum));
        assert_eq!(verify(b" "), Err(DecodeError::Checksum));
        assert_eq!(verify(b"AB"), Err(DecodeError::Checksum));
    }

    #[test]
    fn low_bit_flips_are_detected() {
        let line = b"HCHC 014460852 $";

        for index in 5..14 {
            // Bit 6 is masked out of the sum.
            for bit in 0..6 {
                let mut corrupted = *line;
                corrupted[index] ^= 1 << bit;

                assert_eq!(
                    verify(&corrupted),
                    Err(DecodeError::Checksum),
                    "index: {index}, bit: {bit}"
                );
            }
        }
    }
}
