//! Fuzz target: capture → decode → classify → render
//!
//! Feeds arbitrary capture registers through the whole pilot pipeline and
//! verifies:
//! - No panics for any register contents (no overflow, no divide by zero)
//! - `period == 0` always yields the undefined reading
//! - Off-nominal frequencies always classify as Unknown
//! - The rendered line always fits `REPORT_CAPACITY` and is complete
//!
//! cargo fuzz run fuzz_pilot_pipeline

#![no_main]

use libfuzzer_sys::fuzz_target;
use pilotdecoder::pilot::{
    classify, decode, CaptureSample, PilotReading, PilotState, Report, NOMINAL_FREQUENCY_HZ,
    REPORT_CAPACITY,
};

fn word(data: &[u8], i: usize) -> u32 {
    let mut b = [0u8; 4];
    for (j, slot) in b.iter_mut().enumerate() {
        *slot = data.get(i * 4 + j).copied().unwrap_or(0);
    }
    u32::from_le_bytes(b)
}

fuzz_target!(|data: &[u8]| {
    let sample = CaptureSample {
        pulse_width: word(data, 0),
        period: word(data, 1),
        timer_clock_hz: word(data, 2),
        prescaler: word(data, 3),
    };

    let reading = decode(&sample);
    if sample.period == 0 {
        assert_eq!(reading, PilotReading::UNDEFINED);
    }

    let (state, volts) = classify(&reading);
    assert_eq!(volts, state.voltage());
    if reading.frequency_hz != NOMINAL_FREQUENCY_HZ {
        assert_eq!(state, PilotState::Unknown);
    }

    let line = Report::new(&reading, state).render();
    assert!(line.len() <= REPORT_CAPACITY);
    assert!(line.starts_with("Duty: "));
    assert!(line.ends_with("V\r\n"));
});
