//! GPIO / peripheral pin assignments for the pilot decoder board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Control pilot input
// ---------------------------------------------------------------------------

/// Control-pilot comparator output (±12 V pilot divided and clamped to
/// 0 – 3.3 V).  HIGH = pilot positive.  Any-edge interrupt.
pub const PILOT_INPUT_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// UART report link
// ---------------------------------------------------------------------------

/// UART peripheral carrying the report records.
pub const REPORT_UART_PORT: i32 = 1;
pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
/// Driver RX ring buffer (bytes).  The link is transmit-only, but the
/// ESP-IDF driver requires an RX buffer larger than the hardware FIFO.
pub const UART_RX_BUFFER: i32 = 256;
