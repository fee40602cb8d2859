use crate::common::NetworkBuilder;
use trunkline_core::{BlastPlan, FiringSequence, ValidationReport};

fn sample_plan() -> BlastPlan {
    NetworkBuilder::new()
        .points(&["1", "2", "3", "4"])
        .start("1", "2", 0)
        .start("1", "3", 5)
        .connect("2", "4", 5)
        .connect("3", "4", 0)
        .resolve()
        .expect("valid network")
}

#[test]
fn test_event_stream_roundtrip_is_byte_identical() {
    let plan = sample_plan();

    let encoded = serde_json::to_string(&plan.events).expect("serialize");
    let decoded: FiringSequence = serde_json::from_str(&encoded).expect("deserialize");
    let re_encoded = serde_json::to_string(&decoded).expect("re-serialize");

    assert_eq!(decoded, plan.events);
    assert_eq!(encoded, re_encoded);
}

#[test]
fn test_full_plan_roundtrip() {
    let plan = sample_plan();

    let encoded = serde_json::to_string_pretty(&plan).expect("serialize");
    let decoded: BlastPlan = serde_json::from_str(&encoded).expect("deserialize");
    assert_eq!(decoded, plan);
}

#[test]
fn test_validation_report_roundtrip_keeps_kinds() {
    let report = NetworkBuilder::new()
        .points(&["A", "B"])
        .start("A", "B", 10)
        .connect("A", "B", 10)
        .connect("B", "B", 0)
        .validate();
    assert!(!report.is_valid());

    let encoded = serde_json::to_string(&report).expect("serialize");
    assert!(encoded.contains("\"kind\":\"duplicate_connection\""));
    assert!(encoded.contains("\"kind\":\"self_loop\""));

    let decoded: ValidationReport = serde_json::from_str(&encoded).expect("deserialize");
    assert_eq!(decoded, report);
}
