//! Pilot classifier: (duty cycle, frequency) → charging state and voltage.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  freq != 1000 Hz ──────────────▶ Unknown 2.7V │
//! │  freq == 1000 Hz ──▶ PILOT_TABLE (first match)│
//! │  ┌──────┬───────────────────┬────────┐        │
//! │  │ duty │ state             │ volts  │        │
//! │  ├──────┼───────────────────┼────────┤        │
//! │  │ 100  │ Standby           │  0.0   │        │
//! │  │  10  │ CablePlugged      │  2.7   │        │
//! │  │  50  │ Charging          │  7.0   │        │
//! │  │  95  │ ChargeComplete    │ 12.0   │        │
//! │  │   5  │ Fault             │  0.0   │        │
//! │  │  20  │ ReadyToCharge     │  3.6   │        │
//! │  │  30  │ RenewableCharging │  5.5   │        │
//! │  └──────┴───────────────────┴────────┘        │
//! │  no match ─────────────────────▶ Unknown 2.7V │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Matching is exact.  The frequency gate runs first so a noisy or
//! mis-synchronised signal never reaches duty-cycle interpretation.

use super::sampler::PilotReading;

/// The only frequency at which duty cycle carries meaning.
pub const NOMINAL_FREQUENCY_HZ: u32 = 1000;

/// Voltage reported for [`PilotState::Unknown`], both for unmatched duty
/// cycles and for any non-nominal frequency.
pub const UNKNOWN_VOLTAGE: f32 = 2.7;

/// Charging states encoded on the control pilot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PilotState {
    /// Standby / vehicle detection.
    Standby = 0,
    CablePlugged = 1,
    Charging = 2,
    ChargeComplete = 3,
    Fault = 4,
    ReadyToCharge = 5,
    /// Charging from a renewable source.
    RenewableCharging = 6,
    /// Frequency off-nominal or duty cycle not in the table.
    Unknown = 7,
}

/// Ordered `(duty_cycle_pct, state)` table.  First match wins.
pub const PILOT_TABLE: [(u32, PilotState); 7] = [
    (100, PilotState::Standby),
    (10, PilotState::CablePlugged),
    (50, PilotState::Charging),
    (95, PilotState::ChargeComplete),
    (5, PilotState::Fault),
    (20, PilotState::ReadyToCharge),
    (30, PilotState::RenewableCharging),
];

impl PilotState {
    /// Reference voltage bound to this state.
    pub const fn voltage(self) -> f32 {
        match self {
            Self::Standby => 0.0,
            Self::CablePlugged => 2.7,
            Self::Charging => 7.0,
            Self::ChargeComplete => 12.0,
            Self::Fault => 0.0,
            Self::ReadyToCharge => 3.6,
            Self::RenewableCharging => 5.5,
            Self::Unknown => UNKNOWN_VOLTAGE,
        }
    }

    /// Short upper-case tag for log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standby => "STANDBY",
            Self::CablePlugged => "CABLE_PLUGGED",
            Self::Charging => "CHARGING",
            Self::ChargeComplete => "CHARGE_COMPLETE",
            Self::Fault => "FAULT",
            Self::ReadyToCharge => "READY",
            Self::RenewableCharging => "RENEWABLE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Classify a reading into its pilot state and reference voltage.
pub fn classify(reading: &PilotReading) -> (PilotState, f32) {
    if reading.frequency_hz != NOMINAL_FREQUENCY_HZ {
        return (PilotState::Unknown, UNKNOWN_VOLTAGE);
    }

    let state = PILOT_TABLE
        .iter()
        .find(|(duty, _)| *duty == reading.duty_cycle_pct)
        .map_or(PilotState::Unknown, |(_, state)| *state);

    (state, state.voltage())
}
