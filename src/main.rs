//! Pilot Decoder Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter     UartTransport       LogEventSink          │
//! │  (CapturePort)       (ReportTransport)   (EventSink)           │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            DecoderService (pure logic)                 │    │
//! │  │  sampler · classifier · report                         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  FreeRtos delay (embedded-hal DelayNs) paces one cycle / 1 s   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{error, info};

use pilotdecoder::adapters::hardware::HardwareAdapter;
use pilotdecoder::adapters::log_sink::LogEventSink;
use pilotdecoder::adapters::uart::UartTransport;
use pilotdecoder::app::service::DecoderService;
use pilotdecoder::config::DecoderConfig;
use pilotdecoder::drivers::hw_init;
use pilotdecoder::error::Error;
use pilotdecoder::pins;
use pilotdecoder::sensors::pwm_input::{CaptureTiming, PwmInput};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PilotDecoder v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = DecoderConfig::default();
    config.validate()?;

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals(config.uart_baud).map_err(|e| {
        error!("HAL init failed: {}", e);
        Error::from(e)
    })?;
    hw_init::init_isr_service().map_err(|e| {
        error!("ISR service init failed: {}", e);
        Error::from(e)
    })?;

    // ── 4. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new(PwmInput::new(
        pins::PILOT_INPUT_GPIO,
        CaptureTiming::from(&config),
    ));
    let mut uart = UartTransport::new(pins::REPORT_UART_PORT, config.uart_tx_timeout_ms);
    let mut log_sink = LogEventSink::new();
    let mut delay = FreeRtos;

    // ── 5. Decode loop ────────────────────────────────────────
    let mut service = DecoderService::new(config);
    service.start(&mut log_sink);

    info!("System ready. Entering decode loop.");

    // Returns only on a fatal transport error; the caller (ESP-IDF main
    // task) sees the error and the loop stays stopped.
    let fatal = service.run(&mut hw, &mut uart, &mut delay, &mut log_sink);
    Err(fatal.into())
}
