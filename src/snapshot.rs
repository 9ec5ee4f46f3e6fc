//! The meter snapshot: latest committed value of every decoded field.

use crate::protocol::MAX_LINE_CONTENT_LEN;

/// Text field storage. Large enough for any value a line can carry.
pub type Text = heapless::String<MAX_LINE_CONTENT_LEN>;

/// Latest known values of the meter fields.
///
/// Fields keep their last committed value until a newer frame carrying them is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterSnapshot {
    pub(crate) address: Text,
    pub(crate) tariff_option: Text,
    pub(crate) subscribed_current: u32,
    pub(crate) off_peak_energy: u32,
    pub(crate) peak_energy: u32,
    pub(crate) base_energy: u32,
    pub(crate) tariff_period: Text,
    pub(crate) instantaneous_current: u32,
    pub(crate) max_current: u32,
    pub(crate) apparent_power: u32,
    pub(crate) tariff_change: char,
    pub(crate) status_word: Text,
}

impl Default for MeterSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl MeterSnapshot {
    /// Creates a new [`MeterSnapshot`] with zeroed counters and unknown text fields.
    pub fn new() -> Self {
        Self {
            address: unknown(12),
            tariff_option: unknown(4),
            subscribed_current: 0,
            off_peak_energy: 0,
            peak_energy: 0,
            base_energy: 0,
            tariff_period: unknown(4),
            instantaneous_current: 0,
            max_current: 0,
            apparent_power: 0,
            tariff_change: '-',
            status_word: unknown(6),
        }
    }

    /// `ADCO`: meter address.
    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// `OPTARIF`: tariff option, e.g. `HC..` or `BASE`.
    #[inline]
    pub fn tariff_option(&self) -> &str {
        &self.tariff_option
    }

    /// `ISOUSC`: subscribed current in A.
    #[inline]
    pub const fn subscribed_current(&self) -> u32 {
        self.subscribed_current
    }

    /// `HCHC`: off-peak energy counter in Wh.
    #[inline]
    pub const fn off_peak_energy(&self) -> u32 {
        self.off_peak_energy
    }

    /// `HCHP`: peak energy counter in Wh.
    #[inline]
    pub const fn peak_energy(&self) -> u32 {
        self.peak_energy
    }

    /// `BASE`: base tariff energy counter in Wh.
    #[inline]
    pub const fn base_energy(&self) -> u32 {
        self.base_energy
    }

    /// `PTEC`: current tariff period, e.g. `HP..`.
    #[inline]
    pub fn tariff_period(&self) -> &str {
        &self.tariff_period
    }

    /// `IINST`: instantaneous current in A.
    #[inline]
    pub const fn instantaneous_current(&self) -> u32 {
        self.instantaneous_current
    }

    /// `IMAX`: maximum current in A.
    #[inline]
    pub const fn max_current(&self) -> u32 {
        self.max_current
    }

    /// `PAPP`: apparent power in VA.
    #[inline]
    pub const fn apparent_power(&self) -> u32 {
        self.apparent_power
    }

    /// `HHPHC`: tariff-change schedule group.
    #[inline]
    pub const fn tariff_change(&self) -> char {
        self.tariff_change
    }

    /// `MOTDETAT`: meter status word.
    #[inline]
    pub fn status_word(&self) -> &str {
        &self.status_word
    }
}

/// Diagnostic dump, one `LABEL value` per line.
impl core::fmt::Display for MeterSnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "ADCO {}", self.address)?;
        writeln!(f, "OPTARIF {}", self.tariff_option)?;
        writeln!(f, "ISOUSC {}", self.subscribed_current)?;
        writeln!(f, "HCHC {}", self.off_peak_energy)?;
        writeln!(f, "HCHP {}", self.peak_energy)?;
        writeln!(f, "HBASE {}", self.base_energy)?;
        writeln!(f, "PTEC {}", self.tariff_period)?;
        writeln!(f, "IINST {}", self.instantaneous_current)?;
        writeln!(f, "IMAX {}", self.max_current)?;
        writeln!(f, "PAPP {}", self.apparent_power)?;
        writeln!(f, "HHPHC {}", self.tariff_change)?;
        write!(f, "MOTDETAT {}", self.status_word)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MeterSnapshot {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "MeterSnapshot {{ address: {=str}, tariff_option: {=str}, subscribed_current: {=u32}, off_peak_energy: {=u32}, peak_energy: {=u32}, base_energy: {=u32}, tariff_period: {=str}, instantaneous_current: {=u32}, max_current: {=u32}, apparent_power: {=u32}, tariff_change: {=char}, status_word: {=str} }}",
            self.address.as_str(),
            self.tariff_option.as_str(),
            self.subscribed_current,
            self.off_peak_energy,
            self.peak_energy,
            self.base_energy,
            self.tariff_period.as_str(),
            self.instantaneous_current,
            self.max_current,
            self.apparent_power,
            self.tariff_change,
            self.status_word.as_str(),
        )
    }
}

/// A text field of `len` dashes.
fn unknown(len: usize) -> Text {
    (0..len.min(MAX_LINE_CONTENT_LEN)).map(|_| '-').collect()
}
