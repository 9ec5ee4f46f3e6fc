//! Logging utilities.
//!
//! The macros forward to `tracing`, `log` or `defmt` when the `logging` feature and the matching backend feature are enabled,
//! and expand to nothing otherwise. They must be used in statement position.

pub mod formatter;

pub use formatter::Formatter;

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "logging", feature = "tracing"))]
        tracing::trace!($($arg)*);

        #[cfg(all(feature = "logging", feature = "log"))]
        log::trace!($($arg)*);

        #[cfg(all(feature = "logging", feature = "defmt"))]
        defmt::trace!($($arg)*);
    };
}

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "logging", feature = "tracing"))]
        tracing::debug!($($arg)*);

        #[cfg(all(feature = "logging", feature = "log"))]
        log::debug!($($arg)*);

        #[cfg(all(feature = "logging", feature = "defmt"))]
        defmt::debug!($($arg)*);
    };
}

macro_rules! info {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "logging", feature = "tracing"))]
        tracing::info!($($arg)*);

        #[cfg(all(feature = "logging", feature = "log"))]
        log::info!($($arg)*);

        #[cfg(all(feature = "logging", feature = "defmt"))]
        defmt::info!($($arg)*);
    };
}

macro_rules! warn_ {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "logging", feature = "tracing"))]
        tracing::warn!($($arg)*);

        #[cfg(all(feature = "logging", feature = "log"))]
        log::warn!($($arg)*);

        #[cfg(all(feature = "logging", feature = "defmt"))]
        defmt::warn!($($arg)*);
    };
}

macro_rules! error {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "logging", feature = "tracing"))]
        tracing::error!($($arg)*);

        #[cfg(all(feature = "logging", feature = "log"))]
        log::error!($($arg)*);

        #[cfg(all(feature = "logging", feature = "defmt"))]
        defmt::error!($($arg)*);
    };
}

pub(crate) use {debug, error, info, trace};
// `warn` alone would clash with the builtin lint attribute.
pub(crate) use warn_ as warn;
