//! Field extraction. Maps each checked line, by its position in the frame, to a snapshot field.
//!
//! The off-peak/peak scheme emits the following sequence:
//!
//! | Position | Label      | Field                  |
//! |----------|------------|------------------------|
//! | 1        | `ADCO`     | address                |
//! | 2        | `OPTARIF`  | tariff option          |
//! | 3        | `ISOUSC`   | subscribed current     |
//! | 4        | `HCHC`     | off-peak counter       |
//! | 5        | `HCHP`     | peak counter           |
//! | 6        | `PTEC`     | tariff period          |
//! | 7        | `IINST`    | instantaneous current  |
//! | 8        | `IMAX`     | maximum current        |
//! | 9        | `PAPP`     | apparent power         |
//! | 10       | `HHPHC`    | tariff-change flag     |
//! | 11       | `MOTDETAT` | status word            |
//!
//! The base scheme sends `BASE` at position 4 and has no `HCHP` line, the position skips from 4 to 6.

use crate::{
    error::DecodeError,
    line::Line,
    logging::{trace, warn},
    protocol::LINES_PER_FRAME,
    snapshot::{MeterSnapshot, Text},
};

/// A known line label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Label {
    /// `ADCO`: meter address.
    Adco,
    /// `OPTARIF`: tariff option.
    Optarif,
    /// `ISOUSC`: subscribed current in A.
    Isousc,
    /// `HCHC`: off-peak energy counter in Wh.
    Hchc,
    /// `BASE`: base tariff energy counter in Wh.
    Base,
    /// `HCHP`: peak energy counter in Wh.
    Hchp,
    /// `PTEC`: current tariff period.
    Ptec,
    /// `IINST`: instantaneous current in A.
    Iinst,
    /// `IMAX`: maximum current in A.
    Imax,
    /// `PAPP`: apparent power in VA.
    Papp,
    /// `HHPHC`: tariff-change schedule group.
    Hhphc,
    /// `MOTDETAT`: meter status word.
    Motdetat,
}

impl Label {
    /// All known labels.
    pub const ALL: [Label; 12] = [
        Label::Adco,
        Label::Optarif,
        Label::Isousc,
        Label::Hchc,
        Label::Base,
        Label::Hchp,
        Label::Ptec,
        Label::Iinst,
        Label::Imax,
        Label::Papp,
        Label::Hhphc,
        Label::Motdetat,
    ];

    /// Returns the label as transmitted by the meter.
    pub const fn tag(&self) -> &'static str {
        match self {
            Label::Adco => "ADCO",
            Label::Optarif => "OPTARIF",
            Label::Isousc => "ISOUSC",
            Label::Hchc => "HCHC",
            Label::Base => "BASE",
            Label::Hchp => "HCHP",
            Label::Ptec => "PTEC",
            Label::Iinst => "IINST",
            Label::Imax => "IMAX",
            Label::Papp => "PAPP",
            Label::Hhphc => "HHPHC",
            Label::Motdetat => "MOTDETAT",
        }
    }

    /// Looks up a transmitted label.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.tag() == tag)
    }

    /// Number of extra positions skipped after a line with this label.
    const fn skip(&self) -> usize {
        match self {
            // No HCHP line follows in the base scheme.
            Label::Base => 1,
            _ => 0,
        }
    }

    /// Writes `value` into the field of `snapshot` this label maps to.
    fn apply(&self, value: &str, snapshot: &mut MeterSnapshot) -> Result<(), DecodeError> {
        match self {
            Label::Adco => snapshot.address = text(value)?,
            Label::Optarif => snapshot.tariff_option = text(value)?,
            Label::Isousc => snapshot.subscribed_current = number(value),
            Label::Hchc => snapshot.off_peak_energy = number(value),
            Label::Base => snapshot.base_energy = number(value),
            Label::Hchp => snapshot.peak_energy = number(value),
            Label::Ptec => snapshot.tariff_period = text(value)?,
            Label::Iinst => snapshot.instantaneous_current = number(value),
            Label::Imax => snapshot.max_current = number(value),
            Label::Papp => snapshot.apparent_power = number(value),
            Label::Hhphc => {
                if let Some(flag) = value.chars().next() {
                    snapshot.tariff_change = flag;
                }
            }
            Label::Motdetat => snapshot.status_word = text(value)?,
        }

        Ok(())
    }
}

impl core::fmt::Display for Label {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Labels accepted at each position of a frame. Index `0` is position `1`.
pub const SEQUENCE: [&[Label]; LINES_PER_FRAME] = [
    &[Label::Adco],
    &[Label::Optarif],
    &[Label::Isousc],
    &[Label::Hchc, Label::Base],
    &[Label::Hchp],
    &[Label::Ptec],
    &[Label::Iinst],
    &[Label::Imax],
    &[Label::Papp],
    &[Label::Hhphc],
    &[Label::Motdetat],
];

/// Returns the labels accepted at the 1-based `position`, or an empty slice past the end of the sequence.
pub fn expected(position: usize) -> &'static [Label] {
    position
        .checked_sub(1)
        .and_then(|index| SEQUENCE.get(index))
        .copied()
        .unwrap_or(&[])
}

/// Tracks the position of the next line within a frame and dispatches lines to their fields.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sequence {
    /// Position of the last extracted line. `0` before the first line of a frame.
    position: usize,
}

impl Sequence {
    /// Creates a new [`Sequence`] at the start of a frame.
    #[inline]
    pub const fn new() -> Self {
        Self { position: 0 }
    }

    /// Returns the position of the last extracted line.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Rewinds to the start of a frame.
    #[inline]
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Extracts `line` into `snapshot` if its label is expected at the next position.
    ///
    /// On error `snapshot` is left untouched.
    pub fn extract(&mut self, line: &Line<'_>, snapshot: &mut MeterSnapshot) -> Result<(), DecodeError> {
        self.position += 1;

        let position = self.position;

        let label = Label::from_tag(line.label())
            .filter(|label| expected(position).contains(label))
            .ok_or_else(|| {
                warn!("Out of sequence. position: {}, line: {}", position, line.label());

                DecodeError::Sequence { position }
            })?;

        label.apply(line.value(), snapshot)?;

        trace!("Field extracted. position: {}, label: {}", position, label.tag());

        self.position += label.skip();

        Ok(())
    }
}

/// Copies a text value into a snapshot field.
fn text(value: &str) -> Result<Text, DecodeError> {
    let mut text = Text::new();

    text.push_str(value).map_err(|_| DecodeError::Overflow)?;

    Ok(text)
}

/// Best-effort decimal conversion.
///
/// Leading whitespace is skipped and leading digits are accumulated. Anything else yields `0`.
pub fn number(value: &str) -> u32 {
    value
        .trim_start()
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_u32, |acc, digit| {
            acc.wrapping_mul(10).wrapping_add(u32::from(digit - b'0'))
        })
}

#[cfg(test)]
mod test {
    use super::*;

    fn line(label: &str, value: &str) -> heapless::Vec<u8, 64> {
        crate::tests::content(label, value)
    }

    #[test]
    fn lenient_numbers() {
        assert_eq!(number("014460852"), 14460852);
        assert_eq!(number("002"), 2);
        assert_eq!(number("  35"), 35);
        assert_eq!(number("12AB"), 12);
        assert_eq!(number("HC.."), 0);
        assert_eq!(number(""), 0);
    }

    #[test]
    fn tags_round_trip() {
        for label in Label::ALL {
            assert_eq!(Label::from_tag(label.tag()), Some(label));
        }

        assert_eq!(Label::from_tag("ADPS"), None);
        assert_eq!(Label::from_tag("adco"), None);
    }

    #[test]
    fn expected_labels_per_position() {
        assert!(expected(0).is_empty());
        assert_eq!(expected(1), &[Label::Adco]);
        assert_eq!(expected(4), &[Label::Hchc, Label::Base]);
        assert_eq!(expected(11), &[Label::Motdetat]);
        assert!(expected(12).is_empty());
    }

    #[test]
    fn off_peak_peak_sequence() {
        let mut sequence = Sequence::new();
        let mut snapshot = MeterSnapshot::new();

        let lines = [
            ("ADCO", "270622224349"),
            ("OPTARIF", "HC.."),
            ("ISOUSC", "30"),
            ("HCHC", "014460852"),
            ("HCHP", "012506372"),
            ("PTEC", "HP.."),
            ("IINST", "002"),
            ("IMAX", "035"),
            ("PAPP", "00520"),
            ("HHPHC", "C"),
            ("MOTDETAT", "000000"),
        ];

        for (index, (label, value)) in lines.into_iter().enumerate() {
            let content = line(label, value);
            let line = Line::parse(&content).unwrap();

            sequence.extract(&line, &mut snapshot).unwrap();

            assert_eq!(sequence.position(), index + 1);
        }

        assert_eq!(snapshot.off_peak_energy(), 14460852);
        assert_eq!(snapshot.peak_energy(), 12506372);
        assert_eq!(snapshot.tariff_change(), 'C');
    }

    #[test]
    fn base_skips_peak_position() {
        let mut sequence = Sequence::new();
        let mut snapshot = MeterSnapshot::new();

        for (label, value) in [
            ("ADCO", "270622224349"),
            ("OPTARIF", "BASE"),
            ("ISOUSC", "45"),
            ("BASE", "000123456"),
        ] {
            let content = line(label, value);
            sequence.extract(&Line::parse(&content).unwrap(), &mut snapshot).unwrap();
        }

        assert_eq!(sequence.position(), 5);

        let content = line("PTEC", "TH..");
        sequence.extract(&Line::parse(&content).unwrap(), &mut snapshot).unwrap();

        assert_eq!(sequence.position(), 6);
        assert_eq!(snapshot.base_energy(), 123456);
        assert_eq!(snapshot.tariff_period(), "TH..");
    }

    #[test]
    fn mismatch_leaves_snapshot_untouched() {
        let mut sequence = Sequence::new();
        let mut snapshot = MeterSnapshot::new();

        let content = line("OPTARIF", "HC..");
        let result = sequence.extract(&Line::parse(&content).unwrap(), &mut snapshot);

        assert_eq!(result, Err(DecodeError::Sequence { position: 1 }));
        assert_eq!(snapshot, MeterSnapshot::new());
    }

    #[test]
    fn unknown_label_is_out_of_sequence() {
        let mut sequence = Sequence::new();
        let mut snapshot = MeterSnapshot::new();

        let content = line("ADPS", "045");
        let result = sequence.extract(&Line::parse(&content).unwrap(), &mut snapshot);

        assert_eq!(result, Err(DecodeError::Sequence { position: 1 }));
    }

    #[test]
    fn past_the_last_position() {
        let mut sequence = Sequence { position: 11 };
        let mut snapshot = MeterSnapshot::new();

        let content = line("ADCO", "270622224349");
        let result = sequence.extract(&Line::parse(&content).unwrap(), &mut snapshot);

        assert_eq!(result, Err(DecodeError::Sequence { position: 12 }));
    }
}
