//! Framed read stream. Transforms an [`AsyncRead`] into a stream of committed [`MeterSnapshot`]s.

#[cfg(feature = "std")]
extern crate std;

use futures::Stream;

#[cfg(all(
    feature = "logging",
    any(feature = "log", feature = "defmt", feature = "tracing")
))]
use crate::logging::Formatter;
use crate::{
    decoder::{Decoder, Status},
    error::DecodeError,
    io::AsyncRead,
    logging::{debug, trace, warn},
    snapshot::MeterSnapshot,
};

/// An error that can occur while reading a frame.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadError<I> {
    /// An IO error occurred while reading from the underlying source.
    IO(I),
    /// The frame was abandoned. Reading can go on with the next frame.
    Decode(DecodeError),
    /// EOF was reached. The caller should stop reading.
    EOF,
}

impl<I> ReadError<I> {
    /// Returns `true` if reading can go on after this error.
    #[inline]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

impl<I> From<DecodeError> for ReadError<I> {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl<I> core::fmt::Display for ReadError<I>
where
    I: core::fmt::Display,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IO(err) => write!(f, "IO error: {}", err),
            Self::Decode(err) => write!(f, "Decode error: {}", err),
            Self::EOF => write!(f, "EOF"),
        }
    }
}

#[cfg(feature = "std")]
impl<I> std::error::Error for ReadError<I> where I: std::error::Error {}

/// Internal state for reading frames.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct ReadFrame<const N: usize> {
    /// Number of bytes read into the buffer.
    index: usize,
    /// Number of buffered bytes already fed to the decoder.
    consumed: usize,
    /// The underlying buffer to read into.
    buffer: [u8; N],
}

impl<const N: usize> ReadFrame<N> {
    const fn new() -> Self {
        Self {
            index: 0,
            consumed: 0,
            buffer: [0_u8; N],
        }
    }
}

/// Reads bytes from an [`AsyncRead`] source and feeds them to a [`Decoder`].
///
/// `N` is the size of the read buffer. Any size works, frames are decoded incrementally across reads.
#[derive(Debug)]
pub struct FramedRead<const N: usize, R> {
    state: ReadFrame<N>,
    decoder: Decoder,
    reader: R,
}

impl<const N: usize, R> FramedRead<N, R> {
    /// Creates a new [`FramedRead`] with a fresh [`Decoder`] and the given `reader`.
    #[inline]
    pub fn new(reader: R) -> Self {
        Self::new_with_decoder(Decoder::new(), reader)
    }

    /// Creates a new [`FramedRead`] with the given `decoder` and `reader`.
    #[inline]
    pub fn new_with_decoder(decoder: Decoder, reader: R) -> Self {
        Self {
            state: ReadFrame::new(),
            decoder,
            reader,
        }
    }

    /// Returns the last committed snapshot.
    #[inline]
    pub const fn snapshot(&self) -> &MeterSnapshot {
        self.decoder.snapshot()
    }

    /// Returns reference to the decoder.
    #[inline]
    pub const fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Returns reference to the reader.
    #[inline]
    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// Returns mutable reference to the reader.
    #[inline]
    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consumes the [`FramedRead`] and returns the `decoder` and `reader`.
    #[inline]
    pub fn into_parts(self) -> (Decoder, R) {
        (self.decoder, self.reader)
    }

    /// Reads until a frame is committed.
    ///
    /// Returns:
    /// - `Ok(snapshot)` with the newly committed snapshot. Call `read_frame` again for the next frame.
    /// - `Err(ReadError::Decode(error))` if a frame was abandoned. Call `read_frame` again for the next frame.
    /// - `Err(error)` for any other error. The caller should stop reading.
    pub async fn read_frame(&mut self) -> Result<MeterSnapshot, ReadError<R::Error>>
    where
        R: AsyncRead,
    {
        loop {
            if self.state.consumed < self.state.index {
                trace!("Decoding");

                let (size, outcome) = self
                    .decoder
                    .decode(&self.state.buffer[self.state.consumed..self.state.index]);

                self.state.consumed += size;

                if self.state.consumed == self.state.index {
                    self.state.consumed = 0;
                    self.state.index = 0;
                }

                match outcome {
                    Ok(Status::Complete) => {
                        debug!("Frame decoded, consumed: {}", size);

                        return Ok(self.decoder.snapshot().clone());
                    }
                    Ok(Status::Incomplete) => continue,
                    Err(err) => {
                        warn!("Frame abandoned");

                        return Err(ReadError::Decode(err));
                    }
                }
            }

            trace!("Reading");

            match self.reader.read(&mut self.state.buffer).await {
                Err(err) => {
                    warn!("Failed to read");

                    return Err(ReadError::IO(err));
                }
                Ok(0) => {
                    warn!("Got EOF");

                    return Err(ReadError::EOF);
                }
                Ok(n) => {
                    debug!(
                        "Bytes read. bytes: {}, buffer: {}",
                        n,
                        Formatter(&self.state.buffer[..n])
                    );

                    self.state.index = n;
                }
            }
        }
    }

    /// Converts the [`FramedRead`] into a stream of snapshots.
    ///
    /// Decode errors are yielded and the stream goes on. The stream ends after yielding any other error.
    pub fn stream(
        &mut self,
    ) -> impl Stream<Item = Result<MeterSnapshot, ReadError<R::Error>>> + '_
    where
        R: AsyncRead,
    {
        futures::stream::unfold((self, false), |(this, errored)| async move {
            if errored {
                return None;
            }

            match this.read_frame().await {
                Ok(item) => Some((Ok(item), (this, false))),
                Err(err) => {
                    let errored = !err.is_recoverable();

                    Some((Err(err), (this, errored)))
                }
            }
        })
    }
}

#[cfg(test)]
mod test {
    extern crate std;

    use std::vec::Vec;

    use futures::StreamExt;

    use super::*;
    use crate::tests::{frame, init_tracing, reference_frame};

    async fn collect<const N: usize>(
        bytes: &[u8],
    ) -> Vec<Result<MeterSnapshot, ReadError<core::convert::Infallible>>> {
        let mut framed_read = FramedRead::<N, _>::new(bytes);

        framed_read.stream().collect().await
    }

    #[tokio::test]
    async fn reference_frame_any_buffer_size() {
        init_tracing();

        let bytes = reference_frame();

        for items in [
            collect::<1>(&bytes).await,
            collect::<7>(&bytes).await,
            collect::<64>(&bytes).await,
            collect::<1024>(&bytes).await,
        ] {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].as_ref().unwrap().off_peak_energy(), 14460852);
            assert_eq!(items[1], Err(ReadError::EOF));
        }
    }

    #[tokio::test]
    async fn decode_errors_do_not_end_the_stream() {
        init_tracing();

        let mut bytes = reference_frame();
        bytes.extend(frame(&[("OPTARIF", "HC..")]));
        bytes.extend(frame(&[("ADCO", "111111111111")]));

        let items = collect::<16>(&bytes).await;

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].as_ref().unwrap().address(), "270622224349");
        assert_eq!(
            items[1],
            Err(ReadError::Decode(DecodeError::Sequence { position: 1 }))
        );

        let last = items[2].as_ref().unwrap();

        assert_eq!(last.address(), "111111111111");
        assert_eq!(last.peak_energy(), 12506372);
        assert_eq!(items[3], Err(ReadError::EOF));
    }

    #[tokio::test]
    async fn frames_sharing_a_read() {
        init_tracing();

        let mut bytes = reference_frame();
        bytes.extend(reference_frame());

        let mut framed_read = FramedRead::<1024, _>::new(bytes.as_slice());

        assert!(framed_read.read_frame().await.is_ok());
        assert!(framed_read.read_frame().await.is_ok());
        assert_eq!(framed_read.read_frame().await, Err(ReadError::EOF));
        assert_eq!(framed_read.snapshot().apparent_power(), 520);
    }

    #[tokio::test]
    async fn empty_source() {
        init_tracing();

        let items = collect::<8>(b"").await;

        assert_eq!(items, [Err(ReadError::EOF)]);
    }
}
