use super::*;
use crate::config::{LocationConfig, UnitSystem};
use crate::foundation::error::HudError;
use crate::test_support::RecordingText;
use serde_json::json;

fn config() -> RenderConfig {
    RenderConfig {
        width: 640,
        height: 160,
        ..RenderConfig::default()
    }
}

fn composer(config: RenderConfig) -> FrameComposer<RecordingText> {
    FrameComposer::new(config, RecordingText::default()).unwrap()
}

fn record(v: serde_json::Value) -> TelemetryRecord {
    TelemetryRecord::from_value(v).unwrap()
}

fn driving() -> TelemetryRecord {
    record(json!({
        "vehicleSpeedMps": 10.0,
        "gearState": "DRIVE",
        "brakeApplied": false,
        "acceleratorPedalPosition": 35.0,
        "steeringWheelAngle": 12.5,
        "leftBlinkerOn": true,
        "autopilotState": "SELF_DRIVING",
    }))
}

fn with_fallback_location(mut config: RenderConfig) -> RenderConfig {
    config.location = LocationConfig {
        enabled: true,
        label: None,
        fallback_lat: Some(37.0),
        fallback_lon: Some(-122.0),
    };
    config
}

#[test]
fn missing_record_without_location_is_blank() {
    let mut c = composer(config());
    let frame = c.compose(None, None).unwrap();
    assert_eq!((frame.width, frame.height), (640, 160));
    assert!(frame.is_blank());
    assert!(c.text().drawn.is_empty());
}

#[test]
fn driving_record_draws_speed_unit_and_gear() {
    let mut c = composer(config());
    let mut smoother = TemporalSmoother::new(30.0);
    let frame = c.compose(Some(&driving()), Some(&mut smoother)).unwrap();

    assert!(!frame.is_blank());
    assert_eq!(c.text().texts(), vec!["36", "km/h", "D"]);
}

#[test]
fn mph_units_change_the_readout() {
    let mut cfg = config();
    cfg.units = UnitSystem::Mph;
    let mut c = composer(cfg);
    c.compose(Some(&driving()), None).unwrap();
    assert_eq!(c.text().texts(), vec!["22", "mph", "D"]);
}

#[test]
fn location_tag_is_drawn_for_missing_records() {
    let mut c = composer(with_fallback_location(config()));
    let frame = c.compose(None, None).unwrap();

    assert_eq!(c.text().texts(), vec!["37.00000, -122.00000"]);
    assert!(!frame.is_blank());
    // the tag sits bottom-left, nothing is drawn in the HUD row
    assert_eq!(frame.pixel(320, 30).unwrap()[3], 0);
}

#[test]
fn live_gps_from_the_record_wins() {
    let mut c = composer(with_fallback_location(config()));
    let rec = driving().with("latitude", 48.1).with("longitude", 11.5);
    c.compose(Some(&rec), None).unwrap();
    assert_eq!(c.text().texts()[0], "48.10000, 11.50000");
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = config();
    cfg.icon_supersample = 0;
    assert!(matches!(
        FrameComposer::new(cfg, RecordingText::default()),
        Err(HudError::Validation(_))
    ));

    let mut cfg = config();
    cfg.width = 70_000;
    assert!(FrameComposer::new(cfg, RecordingText::default()).is_err());
}

#[test]
fn smoother_clock_advances_on_missing_records() {
    let mut c = composer(config());
    let mut smoother = TemporalSmoother::new(30.0);
    c.compose(None, Some(&mut smoother)).unwrap();
    c.compose(None, Some(&mut smoother)).unwrap();
    assert!((smoother.elapsed_ms() - 2000.0 / 30.0).abs() < 1e-9);
    assert!(smoother.display_deg().is_none());
}

#[test]
fn without_smoother_steering_is_only_clamped() {
    let rec = driving().with("steeringWheelAngle", 900.0);
    let signals = signals_of(&rec);

    let mut a = composer(config());
    let direct = a.compose(Some(&rec), None).unwrap();

    let mut b = composer(config());
    let resolved = b
        .compose_resolved(Some((&signals, FrameMotion::immediate(540.0))))
        .unwrap();
    assert_eq!(direct, resolved);
}

fn signals_of(rec: &TelemetryRecord) -> CanonicalSignals {
    SignalNormalizer::default().normalize(Some(rec)).unwrap()
}

#[test]
fn composing_is_deterministic() {
    let mut a = composer(config());
    let mut b = composer(config());
    let mut sa = TemporalSmoother::new(30.0);
    let mut sb = TemporalSmoother::new(30.0);
    for _ in 0..3 {
        let fa = a.compose(Some(&driving()), Some(&mut sa)).unwrap();
        let fb = b.compose(Some(&driving()), Some(&mut sb)).unwrap();
        assert_eq!(fa, fb);
    }
}

#[test]
fn blink_pulse_changes_the_lit_blinker() {
    let rec = driving();
    let signals = signals_of(&rec);
    let mut c = composer(config());
    let bright = c
        .compose_resolved(Some((
            &signals,
            FrameMotion {
                steer_deg: 0.0,
                blink_pulse: 1.0,
            },
        )))
        .unwrap();
    let dim = c
        .compose_resolved(Some((
            &signals,
            FrameMotion {
                steer_deg: 0.0,
                blink_pulse: 0.0,
            },
        )))
        .unwrap();
    assert_ne!(bright, dim);
}
