//! PWM sampler: raw capture registers → duty cycle and frequency.

/// One capture of the pilot timer, as supplied by a
/// [`CapturePort`](crate::app::ports::CapturePort).
///
/// `period` uses auto-reload semantics: a full timer period spans
/// `period + 1` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptureSample {
    /// High time of the last pulse (timer ticks).
    pub pulse_width: u32,
    /// Auto-reload value of the capture timer (timer ticks).
    pub period: u32,
    /// Input clock of the capture timer (Hz).
    pub timer_clock_hz: u32,
    /// Prescaler register value (divides by `prescaler + 1`).
    pub prescaler: u32,
}

/// Duty cycle and frequency derived from a [`CaptureSample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PilotReading {
    /// Duty cycle in percent.  Not clamped: a pulse wider than the period
    /// reads above 100.
    pub duty_cycle_pct: u32,
    /// Signal frequency in Hz.
    pub frequency_hz: u32,
}

impl PilotReading {
    /// Reading reported for an undefined signal (`period == 0`).
    pub const UNDEFINED: Self = Self {
        duty_cycle_pct: 0,
        frequency_hz: 0,
    };

    /// Whether this is the undefined-signal fallback.
    pub fn is_undefined(&self) -> bool {
        *self == Self::UNDEFINED
    }
}

/// Decode a capture into a [`PilotReading`].
///
/// `duty = floor(pulse_width * 100 / period)` and
/// `freq = timer_clock_hz / ((period + 1) * (prescaler + 1))`, both
/// computed in 64-bit so the product cannot wrap.
/// A `period` of zero yields [`PilotReading::UNDEFINED`].
pub fn decode(sample: &CaptureSample) -> PilotReading {
    if sample.period == 0 {
        return PilotReading::UNDEFINED;
    }

    let period = u64::from(sample.period);
    let duty = u64::from(sample.pulse_width) * 100 / period;

    // Both factors are at most 2^32, so only the product can leave u64;
    // a divisor that large exceeds any u32 clock and yields 0 Hz.
    let freq = (period + 1)
        .checked_mul(u64::from(sample.prescaler) + 1)
        .map_or(0, |divisor| u64::from(sample.timer_clock_hz) / divisor);

    PilotReading {
        duty_cycle_pct: saturate(duty),
        frequency_hz: saturate(freq),
    }
}

fn saturate(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}
