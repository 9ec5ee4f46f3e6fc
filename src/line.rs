//! Line processing. Turns the raw content of a line into a checked `LABEL VALUE` pair.

use crate::{checksum, error::DecodeError, protocol::SEPARATOR};

/// A line that passed its checksum, stripped of its separator and checksum byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Line<'a> {
    label: &'a str,
    value: &'a str,
}

impl<'a> Line<'a> {
    /// Checks and splits the `content` of a line, i.e. the bytes between the line start and the line end.
    ///
    /// The value starts after the first separator. A line without a separator has an empty value.
    pub fn parse(content: &'a [u8]) -> Result<Self, DecodeError> {
        checksum::verify(content)?;

        let text = core::str::from_utf8(&content[..content.len() - 2])
            .map_err(|_| DecodeError::Checksum)?;

        let (label, value) = match text.find(SEPARATOR as char) {
            Some(index) => (&text[..index], &text[index + 1..]),
            None => (text, ""),
        };

        Ok(Self { label, value })
    }

    /// Returns the label, e.g. `HCHC`.
    #[inline]
    pub const fn label(&self) -> &'a str {
        self.label
    }

    /// Returns the value, e.g. `014460852`.
    #[inline]
    pub const fn value(&self) -> &'a str {
        self.value
    }
}

impl core::fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.label, self.value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn label_and_value() {
        let line = Line::parse(b"ADCO 270622224349 B").unwrap();

        assert_eq!(line.label(), "ADCO");
        assert_eq!(line.value(), "270622224349");
    }

    #[test]
    fn space_checksum() {
        let line = Line::parse(b"PTEC HP..  ").unwrap();

        assert_eq!(line.label(), "PTEC");
        assert_eq!(line.value(), "HP..");
    }

    #[test]
    fn value_keeps_inner_separators() {
        // Only the first separator splits the label from the value.
        let content = crate::tests::content("MOTDETAT", "00 00");
        let line = Line::parse(&content).unwrap();

        assert_eq!(line.label(), "MOTDETAT");
        assert_eq!(line.value(), "00 00");
    }

    #[test]
    fn no_separator() {
        // "ABC" sums to 198, 198 & 0x3F = 6, 6 + 0x20 = '&'
        let line = Line::parse(b"ABC &").unwrap();

        assert_eq!(line.label(), "ABC");
        assert_eq!(line.value(), "");
    }

    #[test]
    fn bad_checksum() {
        assert_eq!(Line::parse(b"IINST 002 Z"), Err(DecodeError::Checksum));
    }
}
