//! Decoder service — the hexagonal core.
//!
//! [`DecoderService`] runs the sample → classify → report pipeline once
//! per cycle.  All I/O flows through port traits injected at call sites,
//! making the service testable with mock adapters.
//!
//! ```text
//!  CapturePort ──▶ ┌────────────────────────────┐ ──▶ ReportTransport
//!                  │       DecoderService        │
//!                  │ sampler · classifier · report│ ──▶ EventSink
//!                  └────────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};

use crate::config::{DecoderConfig, FailurePolicy};
use crate::error::{Error, Result, TransportError};
use crate::pilot::{classify, decode, PilotReading, PilotState, Report};

use super::events::DecoderEvent;
use super::ports::{CapturePort, EventSink, ReportTransport};

/// Everything one cycle produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleOutcome {
    pub reading: PilotReading,
    pub state: PilotState,
    pub report: Report,
    /// `false` when the transport failed and the policy is `Continue`.
    pub delivered: bool,
}

// ───────────────────────────────────────────────────────────────
// DecoderService
// ───────────────────────────────────────────────────────────────

/// Orchestrates the decode pipeline and owns the halt state.
pub struct DecoderService {
    config: DecoderConfig,
    cycle_count: u64,
    /// Set once a fatal transport error stops the loop.
    halted: Option<TransportError>,
}

impl DecoderService {
    /// Construct the service.  Call [`start`](Self::start) before cycling.
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            cycle_count: 0,
            halted: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&DecoderEvent::Started {
            interval_ms: self.config.report_interval_ms,
        });
        info!(
            "DecoderService started ({} ms interval, {:?} on transport failure)",
            self.config.report_interval_ms, self.config.failure_policy
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle: capture → decode → classify → render → send.
    ///
    /// Returns [`Error::Halted`] without touching any port once a fatal
    /// transport error has stopped the service.
    pub fn cycle(
        &mut self,
        capture: &mut impl CapturePort,
        transport: &mut impl ReportTransport,
        sink: &mut impl EventSink,
    ) -> Result<CycleOutcome> {
        if self.halted.is_some() {
            return Err(Error::Halted);
        }
        self.cycle_count += 1;

        // 1. Sample
        let sample = capture.read_capture();
        let mut reading = decode(&sample);
        // A fixed frequency never masks the period == 0 fallback.
        if let Some(freq) = self.config.fixed_frequency_hz.filter(|_| sample.period > 0) {
            reading.frequency_hz = freq;
        }

        // 2. Classify
        let (state, voltage) = classify(&reading);
        sink.emit(&DecoderEvent::Decoded {
            cycle: self.cycle_count,
            reading,
            state,
            voltage,
        });

        // 3. Report
        let report = Report::new(&reading, state);
        let line = report.render();
        debug!("cycle {}: {:?}", self.cycle_count, line.as_str());

        let delivered = match transport.send(line.as_bytes()) {
            Ok(()) => true,
            Err(e) => {
                self.on_transport_failure(e, sink)?;
                false
            }
        };

        Ok(CycleOutcome {
            reading,
            state,
            report,
            delivered,
        })
    }

    /// Cycle forever, sleeping `report_interval_ms` between cycles.
    ///
    /// Returns only when the loop cannot continue; the returned error is
    /// the fatal condition for the supervising layer to act on.
    pub fn run(
        &mut self,
        capture: &mut impl CapturePort,
        transport: &mut impl ReportTransport,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> Error {
        loop {
            if let Err(e) = self.cycle(capture, transport, sink) {
                error!("Decode loop stopped: {}", e);
                return e;
            }
            delay.delay_ms(self.config.report_interval_ms);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Cycles started since construction (halted calls excluded).
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// The transport error that halted the service, if any.
    pub fn halt_reason(&self) -> Option<TransportError> {
        self.halted
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn on_transport_failure(
        &mut self,
        e: TransportError,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        sink.emit(&DecoderEvent::TransportFailed {
            cycle: self.cycle_count,
            error: e,
        });
        match self.config.failure_policy {
            FailurePolicy::Halt => {
                self.halted = Some(e);
                sink.emit(&DecoderEvent::Halted(e));
                Err(Error::Transport(e))
            }
            FailurePolicy::Continue => {
                warn!("Report dropped on cycle {}: {}", self.cycle_count, e);
                Ok(())
            }
        }
    }
}
