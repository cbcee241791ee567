//! Fixed-layout text record for the serial link.
//!
//! `Duty: <u32>%, Freq: <u32> Hz, Voltage: <f32 .2>V\r\n`

use core::fmt::Write;

use super::classifier::PilotState;
use super::sampler::PilotReading;

/// Capacity of a rendered report line.
///
/// The widest line the classifier can produce is 57 bytes: two
/// 10-digit integers and a `12.00` voltage.
pub const REPORT_CAPACITY: usize = 64;

/// Stack-allocated rendered report.
pub type ReportLine = heapless::String<REPORT_CAPACITY>;

/// Decoded triple produced once per cycle.
///
/// The voltage is always the table voltage of the classified state, so
/// every rendered line fits [`REPORT_CAPACITY`] and ends in `V\r\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    duty_cycle_pct: u32,
    frequency_hz: u32,
    state: PilotState,
}

impl Report {
    /// Combine a reading with its classified state.
    pub fn new(reading: &PilotReading, state: PilotState) -> Self {
        Self {
            duty_cycle_pct: reading.duty_cycle_pct,
            frequency_hz: reading.frequency_hz,
            state,
        }
    }

    pub fn duty_cycle_pct(&self) -> u32 {
        self.duty_cycle_pct
    }

    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    pub fn voltage(&self) -> f32 {
        self.state.voltage()
    }

    /// Render the record.
    pub fn render(&self) -> ReportLine {
        let mut line = ReportLine::new();
        // Cannot overflow: at most 57 bytes (two u32 fields, 12.00 V).
        let _ = write!(
            line,
            "Duty: {}%, Freq: {} Hz, Voltage: {:.2}V\r\n",
            self.duty_cycle_pct,
            self.frequency_hz,
            self.voltage()
        );
        line
    }
}
