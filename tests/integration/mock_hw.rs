//! Mock adapters for integration tests.
//!
//! Scripted captures in, recorded bytes and events out, so tests can
//! assert on the full cycle history without touching real timers or UARTs.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use pilotdecoder::app::events::DecoderEvent;
use pilotdecoder::app::ports::{CapturePort, EventSink, ReportTransport};
use pilotdecoder::error::TransportError;
use pilotdecoder::pilot::CaptureSample;

/// 1 MHz capture of `duty` percent at `freq_hz`, in auto-reload form.
pub fn capture_at(duty: u32, freq_hz: u32) -> CaptureSample {
    let period_ticks = 1_000_000 / freq_hz;
    CaptureSample {
        pulse_width: period_ticks * duty / 100,
        period: period_ticks - 1,
        timer_clock_hz: 1_000_000,
        prescaler: 0,
    }
}

// ── ScriptedCapture ───────────────────────────────────────────

/// Plays back a list of captures; the last one repeats forever.
pub struct ScriptedCapture {
    script: VecDeque<CaptureSample>,
    last: CaptureSample,
    pub reads: usize,
}

#[allow(dead_code)]
impl ScriptedCapture {
    pub fn new(samples: &[CaptureSample]) -> Self {
        Self {
            script: samples.iter().copied().collect(),
            last: CaptureSample::default(),
            reads: 0,
        }
    }

    pub fn steady(sample: CaptureSample) -> Self {
        Self::new(&[sample])
    }
}

impl CapturePort for ScriptedCapture {
    fn read_capture(&mut self) -> CaptureSample {
        self.reads += 1;
        if let Some(s) = self.script.pop_front() {
            self.last = s;
        }
        self.last
    }
}

// ── MockTransport ─────────────────────────────────────────────

/// Records every delivered record.  `fail_on` lists 1-based send attempts
/// that return the configured error instead.
pub struct MockTransport {
    pub sent: Vec<String>,
    pub attempts: usize,
    fail_on: Vec<usize>,
    error: TransportError,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            attempts: 0,
            fail_on: Vec::new(),
            error: TransportError::Timeout,
        }
    }

    pub fn failing_on(attempts: &[usize], error: TransportError) -> Self {
        Self {
            fail_on: attempts.to_vec(),
            error,
            ..Self::new()
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.sent.last().map(String::as_str)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportTransport for MockTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.attempts += 1;
        if self.fail_on.contains(&self.attempts) {
            return Err(self.error);
        }
        self.sent.push(String::from_utf8_lossy(bytes).into_owned());
        Ok(())
    }
}

// ── MockDelay ─────────────────────────────────────────────────

/// Accumulates requested delays instead of sleeping.
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
    pub calls: usize,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<DecoderEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&DecoderEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &DecoderEvent) {
        self.events.push(*event);
    }
}
