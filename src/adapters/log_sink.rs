//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured decoder events to the
//! ESP-IDF logger (console UART / USB-CDC, separate from the report link).

use log::{error, info, warn};

use crate::app::events::DecoderEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`DecoderEvent`] to the debug console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &DecoderEvent) {
        match event {
            DecoderEvent::Started { interval_ms } => {
                info!("START | interval={}ms", interval_ms);
            }
            DecoderEvent::Decoded {
                cycle,
                reading,
                state,
                voltage,
            } => {
                info!(
                    "PILOT | cycle={} | duty={}% freq={}Hz | state={} | V={:.2}",
                    cycle,
                    reading.duty_cycle_pct,
                    reading.frequency_hz,
                    state.label(),
                    voltage,
                );
            }
            DecoderEvent::TransportFailed { cycle, error } => {
                warn!("TXERR | cycle={} | {}", cycle, error);
            }
            DecoderEvent::Halted(reason) => {
                error!("HALT  | decode loop stopped: {}", reason);
            }
        }
    }
}
