use super::*;
use serde_json::json;

#[test]
fn parses_records_and_missing_markers() {
    let seq = TelemetrySequence::from_json_str(
        r#"[{"vehicleSpeedMps": 10, "gearState": "D"}, null, {}]"#,
    )
    .unwrap();
    assert_eq!(seq.len(), 3);
    let first = seq.records[0].as_ref().unwrap();
    assert_eq!(first.get("vehicleSpeedMps"), Some(&json!(10)));
    assert_eq!(first.get("gearState"), Some(&json!("D")));
    assert!(seq.records[1].is_none());
    assert!(seq.records[2].as_ref().unwrap().is_empty());
}

#[test]
fn rejects_non_array_and_scalar_entries() {
    let err = TelemetrySequence::from_json_str(r#"{"a": 1}"#).unwrap_err();
    assert!(matches!(err, HudError::Telemetry(_)));

    let err = TelemetrySequence::from_json_str("[1, 2]").unwrap_err();
    assert!(err.to_string().contains("entry 0"));

    assert!(TelemetrySequence::from_json_str("not json").is_err());
}

#[test]
fn from_value_treats_non_objects_as_missing() {
    assert!(TelemetryRecord::from_value(json!(null)).is_none());
    assert!(TelemetryRecord::from_value(json!([1])).is_none());
    let rec = TelemetryRecord::from_value(json!({"x": true})).unwrap();
    assert_eq!(rec.len(), 1);
}

#[test]
fn builder_sets_fields() {
    let rec = TelemetryRecord::default()
        .with("brakeApplied", true)
        .with("steeringWheelAngle", 12.5);
    assert_eq!(rec.get("brakeApplied"), Some(&json!(true)));
    assert_eq!(rec.get("steeringWheelAngle"), Some(&json!(12.5)));
    assert_eq!(rec.get("missing"), None);
}
