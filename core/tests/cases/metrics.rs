use crate::common::NetworkBuilder;
use trunkline_core::BlastMetrics;

#[test]
fn test_metrics_on_uniform_chain() {
    // Four events 20ms apart: 0, 20, 40, 60.
    let plan = NetworkBuilder::new()
        .points(&["A", "B", "C", "D"])
        .start("A", "B", 20)
        .connect("B", "C", 20)
        .connect("C", "D", 20)
        .resolve()
        .expect("valid chain");

    let metrics = &plan.metrics;
    assert_eq!(metrics.event_count, 4);
    assert_eq!(metrics.hole_count, 4);
    assert_eq!(metrics.max_simultaneous, 1);
    assert_eq!(metrics.total_time_us, 60_000);
    assert!((metrics.mean_gap_us - 20_000.0).abs() < 1e-6);
    // hdrhistogram quantiles are exact to three significant figures.
    assert!((metrics.p50_gap_us as i64 - 20_000).abs() <= 20);
    assert!((metrics.p99_gap_us as i64 - 20_000).abs() <= 20);
}

#[test]
fn test_metrics_count_simultaneous_detonations() {
    let plan = NetworkBuilder::new()
        .points(&["S", "A", "B", "C", "T"])
        .start("S", "A", 25)
        .start("S", "B", 25)
        .start("S", "C", 25)
        .connect("A", "T", 25)
        .resolve()
        .expect("valid fan");

    // Events: {S}@0, {A,B,C}@25ms, {T}@50ms.
    let metrics = &plan.metrics;
    assert_eq!(metrics.event_count, 3);
    assert_eq!(metrics.max_simultaneous, 3);
    assert_eq!(metrics.total_time_us, 50_000);
}

#[test]
fn test_metrics_on_empty_sequence() {
    let metrics = BlastMetrics::measure(&Default::default());
    assert_eq!(metrics.event_count, 0);
    assert_eq!(metrics.total_time_us, 0);
    assert_eq!(metrics.max_simultaneous, 0);
    assert_eq!(metrics.mean_gap_us, 0.0);
}

#[test]
fn test_single_event_has_no_gaps() {
    let plan = NetworkBuilder::new()
        .points(&["A", "B"])
        .start("A", "B", 0)
        .resolve()
        .expect("valid pair");

    assert_eq!(plan.metrics.event_count, 1);
    assert_eq!(plan.metrics.mean_gap_us, 0.0);
    assert_eq!(plan.metrics.p99_gap_us, 0);
}
