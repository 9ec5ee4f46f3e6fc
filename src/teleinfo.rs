//! Polling a Teleinfo serial line.
//!
//! [`TeleInfo`] reads from an [`embedded_io`] serial source, typically a UART configured for
//! 1200 baud, 7 data bits, even parity.

use embedded_io::{Read, ReadReady};

use crate::{
    decoder::{Decoder, Status},
    framed_read::ReadError,
    logging::{debug, info},
    snapshot::MeterSnapshot,
};

/// A Teleinfo reader over a blocking serial source.
#[derive(Debug)]
pub struct TeleInfo<S> {
    serial: S,
    decoder: Decoder,
}

impl<S> TeleInfo<S> {
    /// Creates a new [`TeleInfo`] reading from `serial`.
    #[inline]
    pub fn new(serial: S) -> Self {
        Self::new_with_decoder(Decoder::new(), serial)
    }

    /// Creates a new [`TeleInfo`] with the given `decoder` reading from `serial`.
    #[inline]
    pub fn new_with_decoder(decoder: Decoder, serial: S) -> Self {
        Self { serial, decoder }
    }

    /// Returns the last committed snapshot.
    #[inline]
    pub const fn snapshot(&self) -> &MeterSnapshot {
        self.decoder.snapshot()
    }

    /// Off-peak energy counter in Wh, as of the last committed frame.
    #[inline]
    pub const fn off_peak_energy(&self) -> u32 {
        self.snapshot().off_peak_energy()
    }

    /// Peak energy counter in Wh, as of the last committed frame.
    #[inline]
    pub const fn peak_energy(&self) -> u32 {
        self.snapshot().peak_energy()
    }

    /// Base tariff energy counter in Wh, as of the last committed frame.
    #[inline]
    pub const fn base_energy(&self) -> u32 {
        self.snapshot().base_energy()
    }

    /// Returns reference to the decoder.
    #[inline]
    pub const fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Returns mutable reference to the serial source.
    #[inline]
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Consumes the [`TeleInfo`] and returns the `decoder` and `serial` source.
    #[inline]
    pub fn into_parts(self) -> (Decoder, S) {
        (self.decoder, self.serial)
    }

    /// Logs the committed snapshot.
    ///
    /// Only emits anything with the `logging` feature and a logging backend enabled.
    pub fn display_tele_info(&self) {
        info!("{}", self.decoder.snapshot());
    }

    /// Reads one frame.
    ///
    /// Returns immediately with `Ok(None)` if no byte is ready. Otherwise blocks until a frame
    /// is committed or abandoned. An abandoned frame is reported as [`ReadError::Decode`], the
    /// caller should simply try again on its next poll.
    pub fn read_tele_info(&mut self) -> Result<Option<&MeterSnapshot>, ReadError<S::Error>>
    where
        S: Read + ReadReady,
    {
        if !self.serial.read_ready().map_err(ReadError::IO)? {
            return Ok(None);
        }

        debug!("Waiting for a frame");

        loop {
            let byte = self.read_byte()?;

            match self.decoder.step(byte) {
                Ok(Status::Incomplete) => continue,
                Ok(Status::Complete) => return Ok(Some(self.decoder.snapshot())),
                Err(err) => return Err(ReadError::Decode(err)),
            }
        }
    }

    /// Feeds at most one byte to the decoder, without blocking.
    ///
    /// Returns `Ok(Status::Incomplete)` if no byte is ready. Lets a scheduler interleave decoding with other work.
    pub fn poll(&mut self) -> Result<Status, ReadError<S::Error>>
    where
        S: Read + ReadReady,
    {
        if !self.serial.read_ready().map_err(ReadError::IO)? {
            return Ok(Status::Incomplete);
        }

        let byte = self.read_byte()?;

        self.decoder.step(byte).map_err(ReadError::Decode)
    }

    fn read_byte(&mut self) -> Result<u8, ReadError<S::Error>>
    where
        S: Read,
    {
        let mut byte = [0_u8; 1];

        match self.serial.read(&mut byte) {
            Ok(0) => Err(ReadError::EOF),
            Ok(_) => Ok(byte[0]),
            Err(err) => Err(ReadError::IO(err)),
        }
    }
}
