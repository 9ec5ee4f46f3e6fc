/// Renders raw line bytes in log messages.
pub struct Formatter<'a>(pub &'a [u8]);

impl Formatter<'_> {
    /// Produces: [0x0A, 0x48, 0x43, 0x0D]
    #[cfg(feature = "pretty-hex-fmt")]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[")?;

        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }

            write!(f, "0x{:02X}", byte)?;
        }

        write!(f, "]")
    }

    /// Produces: ['\n', 'H', 'C', '\r']
    #[cfg(all(feature = "char-fmt", not(feature = "pretty-hex-fmt")))]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|&b| b as char))
            .finish()
    }

    /// Produces: [0A, 48, 43, 0D]
    #[cfg(all(not(feature = "pretty-hex-fmt"), not(feature = "char-fmt")))]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02X?}", self.0)
    }
}

impl core::fmt::Debug for Formatter<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.fmt(f)
    }
}

impl core::fmt::Display for Formatter<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.fmt(f)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Formatter<'_> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[u8]:x}", self.0)
    }
}
