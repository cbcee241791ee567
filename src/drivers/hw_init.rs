//! One-shot hardware peripheral initialization.
//!
//! Configures the pilot input GPIO, its edge ISR and the report UART using
//! raw ESP-IDF sys calls.  Called once from `main()` before the decode
//! loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::error::Error;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    UartConfigFailed(i32),
    UartInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::UartConfigFailed(rc) => write!(f, "UART param/pin config failed (rc={})", rc),
            Self::UartInstallFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::GpioConfigFailed(_) => Self::Init("pilot GPIO config failed"),
            HwInitError::IsrInstallFailed(_) => Self::Init("pilot edge ISR install failed"),
            HwInitError::UartConfigFailed(_) => Self::Init("report UART config failed"),
            HwInitError::UartInstallFailed(_) => Self::Init("report UART install failed"),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

/// Configure the pilot input and the report UART.
#[cfg(target_os = "espidf")]
pub fn init_peripherals(uart_baud: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the decode loop; single-threaded.
    unsafe {
        init_pilot_gpio()?;
        init_uart(uart_baud)?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(_uart_baud: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── Pilot GPIO ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_pilot_gpio() -> Result<(), HwInitError> {
    // The comparator drives the line; no pulls.
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::PILOT_INPUT_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as esp_err_t { return Err(HwInitError::GpioConfigFailed(ret)); }

    info!("hw_init: pilot input on GPIO{}", pins::PILOT_INPUT_GPIO);
    Ok(())
}

// ── Report UART ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_uart(baud: u32) -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: baud as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    let ret = unsafe { uart_param_config(pins::REPORT_UART_PORT, &cfg) };
    if ret != ESP_OK as esp_err_t { return Err(HwInitError::UartConfigFailed(ret)); }

    let ret = unsafe {
        uart_set_pin(
            pins::REPORT_UART_PORT,
            pins::UART_TX_GPIO,
            pins::UART_RX_GPIO,
            UART_PIN_NO_CHANGE,
            UART_PIN_NO_CHANGE,
        )
    };
    if ret != ESP_OK as esp_err_t { return Err(HwInitError::UartConfigFailed(ret)); }

    // No TX ring buffer: uart_write_bytes blocks until the FIFO accepts
    // the whole record.
    let ret = unsafe {
        uart_driver_install(
            pins::REPORT_UART_PORT,
            pins::UART_RX_BUFFER,
            0,
            0,
            core::ptr::null_mut(),
            0,
        )
    };
    if ret != ESP_OK as esp_err_t { return Err(HwInitError::UartInstallFailed(ret)); }

    info!("hw_init: UART{} at {} baud", pins::REPORT_UART_PORT, baud);
    Ok(())
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
use crate::sensors::pwm_input::pilot_edge_isr_handler;

#[cfg(target_os = "espidf")]
unsafe extern "C" fn pilot_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: esp_timer_get_time and gpio_get_level are register reads;
    // safe in ISR context.
    let now_us = (unsafe { esp_timer_get_time() }) as u32;
    let high = unsafe { gpio_get_level(pins::PILOT_INPUT_GPIO) } != 0;
    pilot_edge_isr_handler(high, now_us);
}

/// Install the per-pin GPIO ISR service and register the pilot edge handler.
/// Call after init_peripherals() and before the decode loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The handler registered
    // below only stores into atomics.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as esp_err_t && ret != ESP_ERR_INVALID_STATE as esp_err_t {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        let ret = gpio_isr_handler_add(
            pins::PILOT_INPUT_GPIO,
            Some(pilot_gpio_isr),
            core::ptr::null_mut(),
        );
        if ret != ESP_OK as esp_err_t {
            return Err(HwInitError::IsrInstallFailed(ret));
        }
        let ret = gpio_intr_enable(pins::PILOT_INPUT_GPIO);
        if ret != ESP_OK as esp_err_t {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        info!("hw_init: ISR service installed (pilot any-edge)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
