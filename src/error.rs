//! Unified error types for the pilot decoder firmware.
//!
//! Malformed captures and unrecognised pilot signals are not errors; they
//! resolve to documented fallbacks inside the pipeline.  What remains is
//! transport failure, the terminal halted state it can lead to, and
//! start-up problems.  All variants are `Copy`.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The report transport rejected or failed to deliver a record.
    Transport(TransportError),
    /// A fatal transport error already stopped the decode loop.
    Halted,
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Halted => write!(f, "decoder halted after fatal error"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Failure reported by a [`ReportTransport`](crate::app::ports::ReportTransport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The bounded send wait expired before the bytes left the FIFO.
    Timeout,
    /// The peripheral accepted fewer bytes than requested.
    Busy,
    /// The driver returned an ESP-IDF error code.
    Hardware(i32),
    /// The link is not open (driver not installed, host pipe closed).
    Disconnected,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "send timed out"),
            Self::Busy => write!(f, "transmit FIFO busy"),
            Self::Hardware(rc) => write!(f, "driver error (rc={rc})"),
            Self::Disconnected => write!(f, "link disconnected"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
