//! I/O traits definition.

use core::future::Future;

/// An asynchronous reader.
pub trait AsyncRead {
    /// The type of error that can be returned by [`AsyncRead`] operations.
    type Error;

    /// Reads bytes from the underlying source into the provided buffer returning how many bytes were read.
    ///
    /// Returning `Ok(0)` signals the end of the source.
    fn read<'a>(
        &'a mut self,
        buf: &'a mut [u8],
    ) -> impl Future<Output = Result<usize, Self::Error>>;
}

impl<T: AsyncRead> AsyncRead for &mut T {
    type Error = T::Error;

    fn read<'a>(
        &'a mut self,
        buf: &'a mut [u8],
    ) -> impl Future<Output = Result<usize, Self::Error>> {
        (*self).read(buf)
    }
}

impl AsyncRead for &[u8] {
    type Error = core::convert::Infallible;

    async fn read<'a>(&'a mut self, buf: &'a mut [u8]) -> Result<usize, Self::Error> {
        let amt = core::cmp::min(buf.len(), self.len());
        let (a, b) = (*self).split_at(amt);

        buf[..amt].copy_from_slice(a);
        *self = b;

        Ok(amt)
    }
}
