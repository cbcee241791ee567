//! Application core — decode orchestration, zero I/O.
//!
//! The [`service::DecoderService`] drives the [`crate::pilot`] pipeline
//! once per cycle.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
