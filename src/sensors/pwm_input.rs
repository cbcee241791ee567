//! Control-pilot PWM input driver.
//!
//! The pilot line is level-shifted into a GPIO configured for any-edge
//! interrupts.  The ISR timestamps every edge with the 1 MHz ESP timer and
//! records the line level; rising→rising gives the period and
//! rising→falling the high time.  The main loop samples the result as a
//! [`CaptureSample`] with auto-reload semantics, so a 1000 µs period is
//! reported as `period = 999` on a 1 MHz clock.
//!
//! ISR and main loop share state only through 32-bit atomics (the ESP32-S3
//! has no native 64-bit atomics).  Edge timestamps are µs modulo 2^32 and
//! only ever compared against nearby edges; line silence is tracked by the
//! reader from the ISR's edge counter on its own 64-bit clock.
//!
//! Interrupt latency shifts each timestamp by a few µs.  A measured period
//! within `jitter_us` of the nominal reload reads as the nominal reload,
//! and a high time within `jitter_us` of a whole percent reads as that
//! percent, which matches what a hardware input-capture timer reports.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::DecoderConfig;
use crate::pilot::CaptureSample;

/// Tick rate of the timestamps fed to [`EdgeCapture::on_edge`].
pub const CAPTURE_CLOCK_HZ: u32 = 1_000_000;

// ── ISR-side capture state ────────────────────────────────────

/// Edge timestamps and derived pulse measurements.
pub struct EdgeCapture {
    last_rise_us: AtomicU32,
    last_edge_us: AtomicU32,
    high_us: AtomicU32,
    period_us: AtomicU32,
    level_high: AtomicBool,
    seen_rise: AtomicBool,
    /// Edges seen so far (wrapping).
    edges: AtomicU32,
}

impl Default for EdgeCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeCapture {
    pub const fn new() -> Self {
        Self {
            last_rise_us: AtomicU32::new(0),
            last_edge_us: AtomicU32::new(0),
            high_us: AtomicU32::new(0),
            period_us: AtomicU32::new(0),
            level_high: AtomicBool::new(false),
            seen_rise: AtomicBool::new(false),
            edges: AtomicU32::new(0),
        }
    }

    /// Record an edge.  `level_high` is the line level read after the edge.
    /// Lock-free — safe to call from interrupt context.
    pub fn on_edge(&self, level_high: bool, now_us: u32) {
        let seen_rise = self.seen_rise.load(Ordering::Relaxed);
        let last_rise = self.last_rise_us.load(Ordering::Relaxed);

        if level_high {
            if seen_rise {
                self.period_us
                    .store(now_us.wrapping_sub(last_rise), Ordering::Release);
            }
            self.last_rise_us.store(now_us, Ordering::Release);
            self.seen_rise.store(true, Ordering::Release);
        } else if seen_rise {
            self.high_us
                .store(now_us.wrapping_sub(last_rise), Ordering::Release);
        }

        self.level_high.store(level_high, Ordering::Release);
        self.last_edge_us.store(now_us, Ordering::Release);
        self.edges.fetch_add(1, Ordering::Release);
    }

    pub fn edge_count(&self) -> u32 {
        self.edges.load(Ordering::Acquire)
    }

    /// Age of the last edge.  Exact only while that edge is less than
    /// 2^32 µs old.
    fn quiet_us(&self, now_us: u32) -> u32 {
        now_us.wrapping_sub(self.last_edge_us.load(Ordering::Acquire))
    }
}

/// Capture state written by the pilot GPIO ISR.
/// `static` because ISR callbacks in ESP-IDF cannot capture closures.
static PILOT_CAPTURE: EdgeCapture = EdgeCapture::new();

/// Called from the GPIO ISR on every pilot edge.
pub fn pilot_edge_isr_handler(level_high: bool, now_us: u32) {
    PILOT_CAPTURE.on_edge(level_high, now_us);
}

// ── Signal conditioning ───────────────────────────────────────

/// Timing parameters the reader applies to raw edge measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTiming {
    /// Edge silence after which the line counts as a steady level.
    pub stale_us: u32,
    /// Expected pilot period (µs).
    pub nominal_period_us: u32,
    /// Timestamp error absorbed on period and high time (µs).  0 disables.
    pub jitter_us: u32,
}

impl From<&DecoderConfig> for CaptureTiming {
    fn from(config: &DecoderConfig) -> Self {
        Self {
            stale_us: config.stale_signal_us,
            nominal_period_us: config.nominal_period_us,
            jitter_us: config.edge_jitter_us,
        }
    }
}

impl CaptureTiming {
    fn settle_period(&self, period_us: u32) -> u32 {
        if period_us.abs_diff(self.nominal_period_us) <= self.jitter_us {
            self.nominal_period_us
        } else {
            period_us
        }
    }

    /// Move `high_us` onto the nearest whole percent of a `period_us`
    /// pulse train when it lies within the jitter window.
    fn settle_high(&self, high_us: u32, period_us: u32) -> u32 {
        // Auto-reload value the duty is computed against.
        let reload = u64::from(period_us.saturating_sub(1));
        if reload < 100 {
            return high_us;
        }
        let pct = (u64::from(high_us) * 100 + reload / 2) / reload;
        let target = (pct * reload).div_ceil(100);
        match u32::try_from(target) {
            Ok(t) if t.abs_diff(high_us) <= self.jitter_us => t,
            _ => high_us,
        }
    }
}

// ── Reader ────────────────────────────────────────────────────

/// Pilot input driver.
pub struct PwmInput {
    timing: CaptureTiming,
    /// Edge count at the previous read.
    last_edges: u32,
    /// Reader clock when the edge count last changed.
    changed_at_us: u64,
    steady: bool,
    /// GPIO pin number (stored for diagnostics / re-init).
    _gpio: i32,
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl PwmInput {
    pub fn new(gpio: i32, timing: CaptureTiming) -> Self {
        Self {
            timing,
            last_edges: 0,
            changed_at_us: 0,
            steady: false,
            _gpio: gpio,
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Sample the ISR-maintained capture state.
    pub fn read(&mut self) -> CaptureSample {
        let now_us = self.now_us();
        self.sample(&PILOT_CAPTURE, now_us)
    }

    /// Build a capture sample from `cap` as of `now_us` on the reader clock.
    ///
    /// With no edge inside the stale window, the line is held at a steady
    /// level: high reads as a full-period pulse, low as an empty one.
    /// Until a full period has been measured, `period` is 0.
    pub fn sample(&mut self, cap: &EdgeCapture, now_us: u64) -> CaptureSample {
        let steady = self.track_silence(cap, now_us);

        let measured_us = cap.period_us.load(Ordering::Acquire);
        if measured_us == 0 {
            return CaptureSample {
                pulse_width: 0,
                period: 0,
                timer_clock_hz: CAPTURE_CLOCK_HZ,
                prescaler: 0,
            };
        }

        let period_us = self.timing.settle_period(measured_us);
        let pulse_width = if !steady {
            let high_us = cap.high_us.load(Ordering::Acquire);
            if period_us == self.timing.nominal_period_us {
                self.timing.settle_high(high_us, period_us)
            } else {
                high_us
            }
        } else if cap.level_high.load(Ordering::Acquire) {
            period_us
        } else {
            0
        };

        CaptureSample {
            pulse_width,
            period: period_us - 1,
            timer_clock_hz: CAPTURE_CLOCK_HZ,
            prescaler: 0,
        }
    }

    fn track_silence(&mut self, cap: &EdgeCapture, now_us: u64) -> bool {
        let edges = cap.edge_count();
        if edges != self.last_edges {
            // An edge arrived since the previous read, so its 32-bit
            // timestamp is recent and the wrapping age is exact.
            self.last_edges = edges;
            self.changed_at_us = now_us;
            self.steady = cap.quiet_us(now_us as u32) > self.timing.stale_us;
        } else if now_us.saturating_sub(self.changed_at_us) > u64::from(self.timing.stale_us) {
            self.steady = true;
        }
        self.steady
    }

    #[cfg(target_os = "espidf")]
    fn now_us(&self) -> u64 {
        // SAFETY: esp_timer_get_time reads the monotonic system timer.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}
