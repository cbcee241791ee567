//! Port traits — the hexagonal boundary between the decoder core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DecoderService (domain)
//! ```
//!
//! Timer capture, serial transmission and event logging are driven
//! adapters.  The [`DecoderService`](super::service::DecoderService)
//! consumes them via generics, so the pipeline never touches hardware
//! directly.  The inter-cycle delay uses
//! [`embedded_hal::delay::DelayNs`] rather than a port of its own.

use crate::error::TransportError;
use crate::pilot::CaptureSample;

// ───────────────────────────────────────────────────────────────
// Capture port (driven adapter: timer → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
pub trait CapturePort {
    /// Most recent pulse width and period, plus the timer's clock and
    /// prescaler configuration.
    fn read_capture(&mut self) -> CaptureSample;
}

// ───────────────────────────────────────────────────────────────
// Report transport (driven adapter: domain → serial link)
// ───────────────────────────────────────────────────────────────

/// Write-side port for rendered report records.
///
/// `send` blocks until the bytes are handed to the link or the
/// implementation's bounded wait expires.
pub trait ReportTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`DecoderEvent`](super::events::DecoderEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::DecoderEvent);
}
