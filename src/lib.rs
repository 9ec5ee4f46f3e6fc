//! # Teleinfo codec
//!
//! A `no_std` streaming decoder for the historic Teleinfo serial output of utility power meters.
//!
//! The meter continuously transmits frames of checksummed `LABEL VALUE` lines over a 7 bit serial line.
//! The [`Decoder`] synchronizes on frame boundaries, checks every line and extracts the fields into a
//! [`MeterSnapshot`]. A snapshot is only ever updated by a whole frame: any checksum, sequence or
//! overflow error discards the frame in progress and leaves the last committed values in place.
//!
//! The decoder is fed one byte at a time and never blocks. On top of it:
//! - [`TeleInfo`] polls a blocking [`embedded_io`](https://docs.rs/embedded-io/latest/embedded_io/) serial source.
//! - [`FramedRead`] reads from an [`AsyncRead`](io::AsyncRead) source and exposes a stream of snapshots.
//!   Compatibility wrappers are provided for [`tokio`](https://docs.rs/tokio/latest/tokio/),
//!   [`futures-io`](https://docs.rs/futures/latest/futures/io/index.html) and
//!   [`embedded_io_async`](https://docs.rs/embedded-io-async/latest/embedded_io_async/).

#![no_std]
#![deny(unsafe_code)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod checksum;
pub mod decoder;
pub mod error;
pub mod field;
pub mod io;
pub mod line;
pub mod protocol;
pub mod snapshot;

pub use decoder::{Decoder, State, Status};
pub use error::DecodeError;
pub use snapshot::MeterSnapshot;

mod framed_read;
pub use framed_read::{FramedRead, ReadError};

#[cfg(feature = "embedded-io")]
#[cfg_attr(docsrs, doc(cfg(feature = "embedded-io")))]
mod teleinfo;
#[cfg(feature = "embedded-io")]
#[cfg_attr(docsrs, doc(cfg(feature = "embedded-io")))]
pub use teleinfo::TeleInfo;

#[cfg(feature = "embedded-io-async")]
#[cfg_attr(docsrs, doc(cfg(feature = "embedded-io-async")))]
pub mod embedded_io_async;

#[cfg(feature = "futures-io")]
#[cfg_attr(docsrs, doc(cfg(feature = "futures-io")))]
pub mod futures_io;

#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
pub mod tokio;

pub(crate) mod logging;
