//! Outbound decoder events.
//!
//! The [`DecoderService`](super::service::DecoderService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.

use crate::error::TransportError;
use crate::pilot::{PilotReading, PilotState};

/// Structured events emitted by the decoder core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecoderEvent {
    /// The service has started (carries the report interval in ms).
    Started { interval_ms: u32 },

    /// A cycle decoded the pilot signal.
    Decoded {
        cycle: u64,
        reading: PilotReading,
        state: PilotState,
        voltage: f32,
    },

    /// `send` failed; the record for this cycle was dropped.
    TransportFailed { cycle: u64, error: TransportError },

    /// A fatal transport error stopped the decode loop.
    Halted(TransportError),
}
