//! Integration tests for the capture → classify → report pipeline.
//!
//! These run on the host and drive `DecoderService::cycle` through mock
//! adapters, asserting on the exact bytes handed to the transport.

use crate::mock_hw::{capture_at, MockTransport, RecordingSink, ScriptedCapture};

use pilotdecoder::app::events::DecoderEvent;
use pilotdecoder::app::service::DecoderService;
use pilotdecoder::config::{DecoderConfig, FailurePolicy};
use pilotdecoder::error::{Error, TransportError};
use pilotdecoder::pilot::{CaptureSample, PilotState};

fn make_service(config: DecoderConfig) -> (DecoderService, RecordingSink) {
    let mut svc = DecoderService::new(config);
    let mut sink = RecordingSink::new();
    svc.start(&mut sink);
    (svc, sink)
}

// ── Table scenarios end to end ───────────────────────────────

#[test]
fn tabled_duty_cycles_produce_expected_records() {
    let cases = [
        (100, PilotState::Standby, "Duty: 100%, Freq: 1000 Hz, Voltage: 0.00V\r\n"),
        (10, PilotState::CablePlugged, "Duty: 10%, Freq: 1000 Hz, Voltage: 2.70V\r\n"),
        (50, PilotState::Charging, "Duty: 50%, Freq: 1000 Hz, Voltage: 7.00V\r\n"),
        (95, PilotState::ChargeComplete, "Duty: 95%, Freq: 1000 Hz, Voltage: 12.00V\r\n"),
        (5, PilotState::Fault, "Duty: 5%, Freq: 1000 Hz, Voltage: 0.00V\r\n"),
        (20, PilotState::ReadyToCharge, "Duty: 20%, Freq: 1000 Hz, Voltage: 3.60V\r\n"),
        (30, PilotState::RenewableCharging, "Duty: 30%, Freq: 1000 Hz, Voltage: 5.50V\r\n"),
        (77, PilotState::Unknown, "Duty: 77%, Freq: 1000 Hz, Voltage: 2.70V\r\n"),
    ];

    for (duty, state, line) in cases {
        let (mut svc, mut sink) = make_service(DecoderConfig::default());
        let mut cap = ScriptedCapture::steady(capture_at(duty, 1000));
        let mut tx = MockTransport::new();

        let out = svc.cycle(&mut cap, &mut tx, &mut sink).unwrap();
        assert_eq!(out.state, state, "duty={duty}");
        assert_eq!(tx.last(), Some(line), "duty={duty}");
    }
}

#[test]
fn off_nominal_frequency_reports_unknown() {
    for freq in [500, 2000] {
        let (mut svc, mut sink) = make_service(DecoderConfig::default());
        let mut cap = ScriptedCapture::steady(capture_at(50, freq));
        let mut tx = MockTransport::new();

        let out = svc.cycle(&mut cap, &mut tx, &mut sink).unwrap();
        assert_eq!(out.reading.frequency_hz, freq);
        assert_eq!(out.state, PilotState::Unknown);
        assert_eq!(
            tx.last().unwrap(),
            format!("Duty: 50%, Freq: {freq} Hz, Voltage: 2.70V\r\n")
        );
    }
}

#[test]
fn zero_period_reports_undefined_signal() {
    let (mut svc, mut sink) = make_service(DecoderConfig::default());
    let mut cap = ScriptedCapture::steady(CaptureSample {
        pulse_width: 1234,
        period: 0,
        timer_clock_hz: 1_000_000,
        prescaler: 0,
    });
    let mut tx = MockTransport::new();

    let out = svc.cycle(&mut cap, &mut tx, &mut sink).unwrap();
    assert!(out.reading.is_undefined());
    assert_eq!(tx.last(), Some("Duty: 0%, Freq: 0 Hz, Voltage: 2.70V\r\n"));
}

#[test]
fn overwide_pulse_passes_through_unclamped() {
    let (mut svc, mut sink) = make_service(DecoderConfig::default());
    let mut cap = ScriptedCapture::steady(CaptureSample {
        pulse_width: 150,
        period: 100,
        timer_clock_hz: 1_000_000,
        prescaler: 0,
    });
    let mut tx = MockTransport::new();

    let out = svc.cycle(&mut cap, &mut tx, &mut sink).unwrap();
    assert_eq!(out.reading.duty_cycle_pct, 150);
    assert!(tx.last().unwrap().starts_with("Duty: 150%, "));
}

// ── Cycle independence ───────────────────────────────────────

#[test]
fn each_cycle_reflects_only_its_own_capture() {
    let (mut svc, mut sink) = make_service(DecoderConfig::default());
    let mut cap = ScriptedCapture::new(&[
        capture_at(10, 1000),
        capture_at(50, 1000),
        CaptureSample::default(),
        capture_at(95, 1000),
    ]);
    let mut tx = MockTransport::new();

    let states: Vec<PilotState> = (0..4)
        .map(|_| svc.cycle(&mut cap, &mut tx, &mut sink).unwrap().state)
        .collect();

    assert_eq!(
        states,
        [
            PilotState::CablePlugged,
            PilotState::Charging,
            PilotState::Unknown,
            PilotState::ChargeComplete,
        ]
    );
    assert_eq!(tx.sent.len(), 4);
    assert_eq!(svc.cycle_count(), 4);
}

#[test]
fn decoded_event_emitted_every_cycle() {
    let (mut svc, mut sink) = make_service(DecoderConfig::default());
    let mut cap = ScriptedCapture::steady(capture_at(20, 1000));
    let mut tx = MockTransport::new();

    for _ in 0..3 {
        svc.cycle(&mut cap, &mut tx, &mut sink).unwrap();
    }

    assert!(matches!(sink.events[0], DecoderEvent::Started { interval_ms: 1000 }));
    assert_eq!(
        sink.count(|e| matches!(
            e,
            DecoderEvent::Decoded { state: PilotState::ReadyToCharge, .. }
        )),
        3
    );
}

// ── Transport failure policies ───────────────────────────────

#[test]
fn halt_policy_stops_after_first_failure() {
    let (mut svc, mut sink) = make_service(DecoderConfig::default());
    let mut cap = ScriptedCapture::steady(capture_at(50, 1000));
    let mut tx = MockTransport::failing_on(&[2], TransportError::Timeout);

    assert!(svc.cycle(&mut cap, &mut tx, &mut sink).is_ok());
    assert_eq!(
        svc.cycle(&mut cap, &mut tx, &mut sink),
        Err(Error::Transport(TransportError::Timeout))
    );
    assert!(svc.is_halted());
    assert_eq!(svc.halt_reason(), Some(TransportError::Timeout));

    // Halted: no further capture reads or sends.
    let reads = cap.reads;
    assert_eq!(svc.cycle(&mut cap, &mut tx, &mut sink), Err(Error::Halted));
    assert_eq!(cap.reads, reads);
    assert_eq!(tx.attempts, 2);
    assert_eq!(svc.cycle_count(), 2);

    assert_eq!(
        sink.count(|e| matches!(e, DecoderEvent::Halted(TransportError::Timeout))),
        1
    );
}

#[test]
fn continue_policy_drops_record_and_keeps_cycling() {
    let config = DecoderConfig {
        failure_policy: FailurePolicy::Continue,
        ..DecoderConfig::default()
    };
    let (mut svc, mut sink) = make_service(config);
    let mut cap = ScriptedCapture::steady(capture_at(30, 1000));
    let mut tx = MockTransport::failing_on(&[1, 3], TransportError::Hardware(-1));

    let delivered: Vec<bool> = (0..4)
        .map(|_| svc.cycle(&mut cap, &mut tx, &mut sink).unwrap().delivered)
        .collect();

    assert_eq!(delivered, [false, true, false, true]);
    assert!(!svc.is_halted());
    assert_eq!(tx.sent.len(), 2);
    assert_eq!(
        sink.count(|e| matches!(e, DecoderEvent::TransportFailed { .. })),
        2
    );
    assert_eq!(sink.count(|e| matches!(e, DecoderEvent::Halted(_))), 0);
}

// ── Fixed-frequency mode ─────────────────────────────────────

#[test]
fn fixed_frequency_classifies_jittery_capture() {
    let config = DecoderConfig {
        fixed_frequency_hz: Some(1000),
        ..DecoderConfig::default()
    };
    let (mut svc, mut sink) = make_service(config);
    // 999 µs measured period → 1001 Hz, off-nominal without the override.
    let mut cap = ScriptedCapture::steady(CaptureSample {
        pulse_width: 499,
        period: 998,
        timer_clock_hz: 1_000_000,
        prescaler: 0,
    });
    let mut tx = MockTransport::new();

    let out = svc.cycle(&mut cap, &mut tx, &mut sink).unwrap();
    assert_eq!(out.state, PilotState::Charging);
    assert_eq!(tx.last(), Some("Duty: 50%, Freq: 1000 Hz, Voltage: 7.00V\r\n"));
}
