//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements      | Connects to               |
//! |------------|-----------------|---------------------------|
//! | `hardware` | CapturePort     | Pilot GPIO edge capture   |
//! | `log_sink` | EventSink       | Debug console log output  |
//! | `uart`     | ReportTransport | ESP32 UART report link    |

pub mod hardware;
pub mod log_sink;
pub mod uart;
