//! Hardware adapter — bridges the pilot input to the capture port.
//!
//! Owns the [`PwmInput`] driver and exposes it through [`CapturePort`].
//! On non-espidf targets the driver samples an ISR state that nothing
//! feeds, so every capture reads as the undefined signal.

use crate::app::ports::CapturePort;
use crate::pilot::CaptureSample;
use crate::sensors::pwm_input::PwmInput;

/// Concrete adapter for the capture timer.
pub struct HardwareAdapter {
    pwm: PwmInput,
}

impl HardwareAdapter {
    pub fn new(pwm: PwmInput) -> Self {
        Self { pwm }
    }
}

// ── CapturePort implementation ────────────────────────────────

impl CapturePort for HardwareAdapter {
    fn read_capture(&mut self) -> CaptureSample {
        self.pwm.read()
    }
}
