//! Sensor drivers.
//!
//! The firmware has a single input: the control-pilot line, sampled by
//! [`pwm_input::PwmInput`] from ISR-maintained edge timestamps.

pub mod pwm_input;
