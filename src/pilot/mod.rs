//! Control-pilot decoding pipeline — pure logic, zero I/O.
//!
//! ```text
//!  CaptureSample ──▶ sampler ──▶ PilotReading ──▶ classifier ──▶ (PilotState, V)
//!                                     │                                │
//!                                     └────────────▶ report ◀──────────┘
//!                                                      │
//!                                              "Duty: ..%, Freq: .. Hz, Voltage: ..V\r\n"
//! ```
//!
//! Every stage is a pure function of its input, so the whole pipeline is
//! recomputed from scratch each cycle.  The only shared data is the
//! compiled-in [`classifier::PILOT_TABLE`].

pub mod classifier;
pub mod report;
pub mod sampler;

pub use classifier::{classify, PilotState, NOMINAL_FREQUENCY_HZ, PILOT_TABLE, UNKNOWN_VOLTAGE};
pub use report::{Report, ReportLine, REPORT_CAPACITY};
pub use sampler::{decode, CaptureSample, PilotReading};
