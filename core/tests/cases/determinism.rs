use crate::common::NetworkBuilder;
use rand::prelude::*;
use trunkline_core::{resolve_network, EngineConfig, Network};

fn fan_and_chain() -> Network {
    // Two rows initiated from one corner hole, with a cross-tie.
    NetworkBuilder::new()
        .points(&["H01", "H02", "H03", "H04", "H05", "H06"])
        .start("H01", "H02", 17)
        .connect("H02", "H03", 17)
        .start("H01", "H04", 25)
        .connect("H04", "H05", 17)
        .connect("H05", "H06", 17)
        .connect("H03", "H06", 42)
        .build()
}

#[test]
fn test_same_snapshot_resolves_identically() {
    let network = fan_and_chain();
    let config = EngineConfig::default();

    let first = resolve_network(&network, &config, None).expect("valid network");
    let second = resolve_network(&network, &config, None).expect("valid network");

    assert_eq!(first, second);
}

#[test]
fn test_connection_order_does_not_change_the_plan() {
    let seed = 12345;
    let config = EngineConfig::default();
    let baseline = resolve_network(&fan_and_chain(), &config, None).expect("valid network");

    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..10 {
        let mut shuffled = fan_and_chain();
        shuffled.connections.shuffle(&mut rng);
        let plan = resolve_network(&shuffled, &config, None).expect("valid network");
        assert_eq!(plan, baseline, "plan must not depend on connection order");
    }
}

#[test]
fn test_point_order_does_not_change_timings_or_events() {
    let seed = 67890;
    let config = EngineConfig::default();
    let baseline = resolve_network(&fan_and_chain(), &config, None).expect("valid network");

    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..10 {
        let mut shuffled = fan_and_chain();
        shuffled.points.shuffle(&mut rng);
        let plan = resolve_network(&shuffled, &config, None).expect("valid network");
        assert_eq!(plan.timings, baseline.timings);
        assert_eq!(plan.events, baseline.events);
        assert_eq!(plan.metrics, baseline.metrics);
    }
}

#[test]
fn test_serialized_stream_is_stable_across_runs() {
    let network = fan_and_chain();
    let config = EngineConfig::default();

    let first = resolve_network(&network, &config, None).expect("valid network");
    let second = resolve_network(&network, &config, None).expect("valid network");

    let a = serde_json::to_string(&first.events).expect("serialize");
    let b = serde_json::to_string(&second.events).expect("serialize");
    assert_eq!(a, b);
}
