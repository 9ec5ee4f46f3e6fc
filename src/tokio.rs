//! Compatibility with [`tokio`].
//!
//! - [`Compat`] turns a [`Tokio's AsyncRead`](tokio::io::AsyncRead) into a [`Crate's AsyncRead`](crate::io::AsyncRead)
//!   to be used with [`FramedRead`](crate::FramedRead).
//! - [`TeleinfoCodec`] is a [`tokio_util::codec::Decoder`] to be used with [`tokio_util::codec::FramedRead`].

extern crate std;

use core::borrow::{Borrow, BorrowMut};

use tokio_util::bytes::{Buf, BytesMut};

use crate::{
    decoder::{Decoder, Status},
    error::DecodeError,
    io::AsyncRead as CrateAsyncRead,
    snapshot::MeterSnapshot,
};

/// Compatibility wrapper for [`Tokio's AsyncRead`](tokio::io::AsyncRead).
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Compat<R>(R);

impl<R> Compat<R> {
    /// Creates a new [`Compat`] from a [`Tokio's AsyncRead`](tokio::io::AsyncRead).
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

impl<R> Borrow<R> for Compat<R> {
    fn borrow(&self) -> &R {
        self.inner()
    }
}

impl<R> BorrowMut<R> for Compat<R> {
    fn borrow_mut(&mut self) -> &mut R {
        self.inner_mut()
    }
}

impl<R> From<R> for Compat<R> {
    fn from(inner: R) -> Self {
        Self::new(inner)
    }
}

const _: () = {
    use tokio::io::AsyncReadExt;

    impl<R> CrateAsyncRead for Compat<R>
    where
        R: tokio::io::AsyncRead + Unpin,
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

/// A [`tokio_util::codec::Decoder`] yielding a snapshot for every committed frame.
///
/// Abandoned frames are yielded as `Err` items and do not end the stream.
#[derive(Debug, Clone, Default)]
pub struct TeleinfoCodec {
    decoder: Decoder,
}

impl TeleinfoCodec {
    /// Creates a new [`TeleinfoCodec`].
    #[inline]
    pub fn new() -> Self {
        Self {
            decoder: Decoder::new(),
        }
    }

    /// Returns the last committed snapshot.
    #[inline]
    pub const fn snapshot(&self) -> &MeterSnapshot {
        self.decoder.snapshot()
    }
}

impl From<Decoder> for TeleinfoCodec {
    fn from(decoder: Decoder) -> Self {
        Self { decoder }
    }
}

impl tokio_util::codec::Decoder for TeleinfoCodec {
    type Item = Result<MeterSnapshot, DecodeError>;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let (consumed, outcome) = self.decoder.decode(src);

        src.advance(consumed);

        match outcome {
            Ok(Status::Incomplete) => Ok(None),
            Ok(Status::Complete) => Ok(Some(Ok(self.decoder.snapshot().clone()))),
            Err(err) => Ok(Some(Err(err))),
        }
    }
}

#[cfg(test)]
mod test {
    extern crate std;

    use std::vec::Vec;

    use futures::StreamExt;
    use tokio::io::AsyncWriteExt;

    use super::*;
    use crate::{
        framed_read::{FramedRead, ReadError},
        tests::{frame, init_tracing, reference_frame},
    };

    #[tokio::test]
    async fn framed_read_from_slow_writer() {
        init_tracing();

        let bytes = reference_frame();
        let (read, mut write) = tokio::io::duplex(8);

        let handle = tokio::spawn(async move {
            for chunk in bytes.chunks(5) {
                write.write_all(chunk).await.unwrap();
                tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
            }
        });

        let mut framed_read = FramedRead::<16, _>::new(Compat::new(read));

        let snapshot = framed_read.read_frame().await.unwrap();

        assert_eq!(snapshot.address(), "270622224349");
        assert_eq!(snapshot.apparent_power(), 520);

        handle.await.unwrap();

        assert!(matches!(framed_read.read_frame().await, Err(ReadError::EOF)));
    }

    #[tokio::test]
    async fn codec_over_mock_serial() {
        init_tracing();

        let bytes = reference_frame();
        let (head, tail) = bytes.split_at(40);

        let mut corrupted = frame(&[("ADCO", "270622224349"), ("OPTARIF", "HC..")]);
        let last_line_checksum = corrupted.len() - 3;
        corrupted[last_line_checksum] ^= 1;

        let mock = tokio_test::io::Builder::new()
            .read(b"\x0DPAPP 0")
            .read(head)
            .read(tail)
            .read(&corrupted)
            .read(&frame(&[("ADCO", "111111111111")]))
            .build();

        let items: Vec<_> = tokio_util::codec::FramedRead::new(mock, TeleinfoCodec::new())
            .collect()
            .await;

        assert_eq!(items.len(), 3);

        let first = items[0].as_ref().unwrap().as_ref().unwrap();

        assert_eq!(first.off_peak_energy(), 14460852);
        assert_eq!(
            items[1].as_ref().unwrap().as_ref().unwrap_err(),
            &DecodeError::Checksum
        );

        let last = items[2].as_ref().unwrap().as_ref().unwrap();

        assert_eq!(last.address(), "111111111111");
        assert_eq!(last.off_peak_energy(), 14460852);
    }
}
