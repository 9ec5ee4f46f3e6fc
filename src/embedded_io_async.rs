//! Compatibility wrapper for [`Embedded-io-async's Read`](embedded_io_async::Read).

use crate::io::AsyncRead as CrateRead;

/// Compatibility wrapper for [`Embedded-io-async's Read`](embedded_io_async::Read).
///
/// Converts an [`Embedded-io-async's Read`](embedded_io_async::Read), e.g. an async UART driver,
/// into a [`Crate's AsyncRead`](crate::io::AsyncRead).
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Compat<R>(R);

impl<R> Compat<R> {
    /// Creates a new [`Compat`] from an [`Embedded-io-async's Read`](embedded_io_async::Read).
    #[inline]
    pub const fn new(inner: R) -> Self {
        Compat(inner)
    }

    /// Returns a reference to the inner reader.
    #[inline]
    pub const fn inner(&self) -> &R {
        &self.0
    }

    /// Returns a mutable reference to the inner reader.
    #[inline]
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.0
    }

    /// Returns the inner reader consuming this [`Compat`].
    #[inline]
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R> From<R> for Compat<R> {
    fn from(inner: R) -> Self {
        Self::new(inner)
    }
}

const _: () = {
    use embedded_io_async::ErrorType;

    impl<R> CrateRead for Compat<R>
    where
        R: embedded_io_async::Read,
    {
        type Error = <R as ErrorType>::Error;

        fn read<'a>(
            &'a mut self,
            buf: &'a mut [u8],
        ) -> impl core::future::Future<Output = Result<usize, Self::Error>> {
            self.0.read(buf)
        }
    }
};
