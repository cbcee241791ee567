//! Decoder configuration parameters
//!
//! Compiled-in tunables for the control-pilot decoder.  There is no
//! configuration file or environment override; the firmware validates the
//! defaults once at boot.

use crate::error::{Error, Result};

/// What the decode loop does when the report transport fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop all further cycles and hand the error to the caller.
    Halt,
    /// Log the failure, drop the record, and keep cycling.
    Continue,
}

/// Core decoder configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    // --- Timing ---
    /// Time between decode cycles (milliseconds)
    pub report_interval_ms: u32,

    // --- Error handling ---
    /// Reaction to a transport error
    pub failure_policy: FailurePolicy,

    // --- Measurement ---
    /// Report this frequency for every valid capture instead of measuring it.
    /// `None` measures the frequency from the capture registers.
    pub fixed_frequency_hz: Option<u32>,
    /// Edge silence (µs) after which the pilot line counts as a steady level
    pub stale_signal_us: u32,
    /// Expected pilot period (µs) on the capture clock
    pub nominal_period_us: u32,
    /// Edge timestamp error (µs) absorbed by the capture driver; 0 disables
    pub edge_jitter_us: u32,

    // --- Serial link ---
    /// UART baud rate
    pub uart_baud: u32,
    /// Upper bound on a blocking send (milliseconds)
    pub uart_tx_timeout_ms: u32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            report_interval_ms: 1000, // 1 Hz

            failure_policy: FailurePolicy::Halt,

            fixed_frequency_hz: None,
            stale_signal_us: 50_000, // 50 pilot periods at 1 kHz
            nominal_period_us: 1000, // 1 kHz
            edge_jitter_us: 2,

            uart_baud: 115_200,
            uart_tx_timeout_ms: 100,
        }
    }
}

impl DecoderConfig {
    /// Reject values the decode loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.report_interval_ms == 0 {
            return Err(Error::Config("report_interval_ms must be > 0"));
        }
        if self.fixed_frequency_hz == Some(0) {
            return Err(Error::Config("fixed_frequency_hz must be > 0 when set"));
        }
        if self.stale_signal_us == 0 {
            return Err(Error::Config("stale_signal_us must be > 0"));
        }
        if self.edge_jitter_us >= self.nominal_period_us / 100 {
            return Err(Error::Config("edge_jitter_us must be under 1% of nominal_period_us"));
        }
        if self.uart_baud == 0 {
            return Err(Error::Config("uart_baud must be > 0"));
        }
        if self.uart_tx_timeout_ms == 0 {
            return Err(Error::Config("uart_tx_timeout_ms must be > 0"));
        }
        Ok(())
    }
}
