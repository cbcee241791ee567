//! Peripheral bring-up helpers.

pub mod hw_init;
