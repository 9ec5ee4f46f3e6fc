//! Compatibility wrapper for [`Futures-io' AsyncRead`](futures::io::AsyncRead).

extern crate std;

use crate::io::AsyncRead as CrateAsyncRead;

/// Compatibility wrapper for [`Futures-io' AsyncRead`](futures::io::AsyncRead).
///
/// Converts a [`Futures-io' AsyncRead`](futures::io::AsyncRead) into a [`Crate's AsyncRead`](crate::io::AsyncRead).
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Compat<R>(R);

impl<R> Compat<R> {
    /// Creates a new [`Compat`] from a [`Futures-io' AsyncRead`](futures::io::AsyncRead).
    #[inline]
    pub const fn new(inner: R) -> Self {
        Compat(inner)
    }

    /// Returns a reference to the inner reader.
    #[inline]
    pub const fn inner(&self) -> &R {
        &self.0
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
    use futures::io::AsyncReadExt;

    impl<R> CrateAsyncRead for Compat<R>
    where
        R: futures::io::AsyncRead + Unpin,
    {
        type Error = std::io::Error;

        fn read<'a>(
            &'a mut self,
            buf: &'a mut [u8],
        ) -> impl core::future::Future<Output = Result<usize, Self::Error>> {
            self.0.read(buf)
        }
    }
};
