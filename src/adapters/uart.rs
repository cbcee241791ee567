//! UART report transport.
//!
//! Implements [`ReportTransport`] on top of the ESP-IDF UART driver
//! installed by [`hw_init`](crate::drivers::hw_init).  `send` pushes the
//! record into the driver and waits for the FIFO to drain, bounded by the
//! configured timeout.
//!
//! - **`target_os = "espidf"`** — `uart_write_bytes` + `uart_wait_tx_done`.
//! - **`not(target_os = "espidf")`** — writes to stdout for simulation.

use crate::app::ports::ReportTransport;
use crate::error::TransportError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Blocking UART transport with a bounded wait.
pub struct UartTransport {
    #[cfg(target_os = "espidf")]
    port: uart_port_t,
    #[cfg(target_os = "espidf")]
    timeout_ticks: u32,
    #[cfg(not(target_os = "espidf"))]
    out: std::io::Stdout,
}

impl UartTransport {
    #[cfg(target_os = "espidf")]
    pub fn new(port: i32, timeout_ms: u32) -> Self {
        let ticks = u64::from(timeout_ms) * u64::from(CONFIG_FREERTOS_HZ) / 1000;
        Self {
            port,
            timeout_ticks: ticks.clamp(1, u64::from(u32::MAX)) as u32,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(_port: i32, _timeout_ms: u32) -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

#[cfg(target_os = "espidf")]
impl ReportTransport for UartTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        // SAFETY: the driver for `self.port` was installed in hw_init before
        // this adapter was constructed; `bytes` outlives the call.
        let written = unsafe { uart_write_bytes(self.port, bytes.as_ptr().cast(), bytes.len()) };
        if written < 0 {
            return Err(TransportError::Hardware(written));
        }
        if (written as usize) < bytes.len() {
            return Err(TransportError::Busy);
        }

        // SAFETY: same driver invariant as above.
        let ret = unsafe { uart_wait_tx_done(self.port, self.timeout_ticks) };
        if ret == ESP_OK as esp_err_t {
            Ok(())
        } else if ret == ESP_ERR_TIMEOUT as esp_err_t {
            Err(TransportError::Timeout)
        } else if ret == ESP_FAIL as esp_err_t {
            // Driver not installed for this port.
            Err(TransportError::Disconnected)
        } else {
            Err(TransportError::Hardware(ret))
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl ReportTransport for UartTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        use std::io::{ErrorKind, Write};

        let mut out = self.out.lock();
        out.write_all(bytes)
            .and_then(|()| out.flush())
            .map_err(|e| match e.kind() {
                ErrorKind::TimedOut | ErrorKind::WouldBlock => TransportError::Timeout,
                ErrorKind::BrokenPipe | ErrorKind::NotConnected => TransportError::Disconnected,
                _ => TransportError::Hardware(e.raw_os_error().unwrap_or(-1)),
            })
    }
}
