//! Resumable frame decoder.
//!
//! The decoder consumes one byte per [`Decoder::step`] and never blocks. It walks through
//! `AwaitStart -> InFrame -> (InLine)* -> AwaitStart`, decoding every completed line into a
//! candidate snapshot. The candidate replaces the committed snapshot in a single swap when the
//! frame ends. Any error drops the candidate and goes back to waiting for a frame start.

use heapless::Vec;

#[cfg(all(
    feature = "logging",
    any(feature = "log", feature = "defmt", feature = "tracing")
))]
use crate::logging::Formatter;
use crate::{
    error::DecodeError,
    field::Sequence,
    line::Line,
    logging::{debug, error, trace, warn},
    protocol::{
        FRAME_END, FRAME_START, LINE_END, LINE_START, MAX_FRAME_LEN, MAX_LINE_CONTENT_LEN,
        SEVEN_BIT_MASK,
    },
    snapshot::MeterSnapshot,
};

/// Where the decoder stands in the byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Discarding bytes until a frame start.
    AwaitStart,
    /// Inside a frame, between lines.
    InFrame,
    /// Accumulating a line.
    InLine,
}

/// Outcome of feeding bytes to the [`Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// More bytes are needed.
    Incomplete,
    /// A frame ended and its fields were committed to the snapshot.
    Complete,
}

/// A byte-at-a-time Teleinfo decoder owning the committed [`MeterSnapshot`].
#[derive(Debug, Clone)]
pub struct Decoder {
    state: State,
    /// Number of bytes read since the frame start.
    frame_len: usize,
    /// Content of the current line, without its line start.
    line: Vec<u8, MAX_LINE_CONTENT_LEN>,
    sequence: Sequence,
    /// Fields decoded so far in the current frame, on top of the committed snapshot.
    candidate: MeterSnapshot,
    snapshot: MeterSnapshot,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Creates a new [`Decoder`] with an initial [`MeterSnapshot`].
    pub fn new() -> Self {
        Self::with_snapshot(MeterSnapshot::new())
    }

    /// Creates a new [`Decoder`] starting from the given `snapshot`.
    pub fn with_snapshot(snapshot: MeterSnapshot) -> Self {
        Self {
            state: State::AwaitStart,
            frame_len: 0,
            line: Vec::new(),
            sequence: Sequence::new(),
            candidate: snapshot.clone(),
            snapshot,
        }
    }

    /// Returns the committed snapshot.
    #[inline]
    pub const fn snapshot(&self) -> &MeterSnapshot {
        &self.snapshot
    }

    /// Consumes the [`Decoder`] and returns the committed snapshot.
    #[inline]
    pub fn into_snapshot(self) -> MeterSnapshot {
        self.snapshot
    }

    /// Returns the current state.
    #[inline]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Drops any frame in progress and restores the initial snapshot.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feeds a single `byte`.
    ///
    /// Returns:
    /// - `Ok(Status::Incomplete)` if the frame, if any, is still open.
    /// - `Ok(Status::Complete)` if the frame ended. The snapshot now holds its fields.
    /// - `Err(error)` if the frame was abandoned. The snapshot is unchanged.
    pub fn step(&mut self, byte: u8) -> Result<Status, DecodeError> {
        let byte = byte & SEVEN_BIT_MASK;

        if self.state == State::AwaitStart {
            if byte == FRAME_START {
                self.begin_frame();
            }

            return Ok(Status::Incomplete);
        }

        self.frame_len += 1;

        if self.frame_len > MAX_FRAME_LEN {
            return Err(self.abort(DecodeError::Overflow));
        }

        match (self.state, byte) {
            (_, FRAME_END) => {
                self.commit();

                Ok(Status::Complete)
            }
            (_, LINE_START) => {
                self.line.clear();
                self.state = State::InLine;

                Ok(Status::Incomplete)
            }
            (State::InLine, LINE_END) => {
                self.state = State::InFrame;

                match self.end_line() {
                    Ok(()) => Ok(Status::Incomplete),
                    Err(err) => Err(self.abort(err)),
                }
            }
            (State::InFrame, LINE_END) => {
                warn!("Line ended without a line start");

                Err(self.abort(DecodeError::Checksum))
            }
            (State::InLine, _) => {
                if self.line.push(byte).is_err() {
                    return Err(self.abort(DecodeError::Overflow));
                }

                Ok(Status::Incomplete)
            }
            _ => Ok(Status::Incomplete),
        }
    }

    /// Feeds bytes from `src` until a frame ends, an error occurs or `src` is exhausted.
    ///
    /// Returns the number of bytes consumed along with the last outcome.
    pub fn decode(&mut self, src: &[u8]) -> (usize, Result<Status, DecodeError>) {
        for (index, &byte) in src.iter().enumerate() {
            match self.step(byte) {
                Ok(Status::Incomplete) => continue,
                outcome => return (index + 1, outcome),
            }
        }

        (src.len(), Ok(Status::Incomplete))
    }

    fn begin_frame(&mut self) {
        trace!("Frame started");

        self.state = State::InFrame;
        self.frame_len = 0;
        self.line.clear();
        self.sequence.reset();
        self.candidate.clone_from(&self.snapshot);
    }

    fn end_line(&mut self) -> Result<(), DecodeError> {
        debug!("Line received. line: {}", Formatter(&self.line));

        let line = Line::parse(&self.line)?;

        self.sequence.extract(&line, &mut self.candidate)
    }

    fn commit(&mut self) {
        debug!(
            "Frame complete. len: {}, lines: {}",
            self.frame_len,
            self.sequence.position()
        );

        core::mem::swap(&mut self.snapshot, &mut self.candidate);

        self.state = State::AwaitStart;
    }

    fn abort(&mut self, err: DecodeError) -> DecodeError {
        match err {
            DecodeError::Checksum => {
                error!("Checksum error ...");
            }
            DecodeError::Sequence { position } => {
                error!("Sequence error ... position: {}", position);
            }
            DecodeError::Overflow => {
                error!("Overflow error ... len: {}", self.frame_len);
            }
        }

        self.state = State::AwaitStart;

        err
    }
}
