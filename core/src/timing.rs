use crate::graph::ConnectionGraph;
use crate::network::{HoleId, Network};
use crate::report::BlastWarning;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Per-hole result: earliest signal arrival, position in the firing order,
/// and the connections whose legs deliver that earliest signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTiming {
    pub hole_id: HoleId,
    pub arrival_us: u64,
    pub rank: usize,
    pub contributing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimingResolution {
    /// Sorted by (arrival, hole id); `rank` matches the position.
    pub timings: Vec<ResolvedTiming>,
    pub warnings: Vec<BlastWarning>,
}

/// Earliest-arrival propagation. Every origin is seeded at time zero and
/// holes are settled in non-decreasing arrival order off a min-heap; where
/// several legs reach the same hole, the first signal wins. Exact for the
/// validated graph (acyclic, non-negative delays) and tolerant of ties and
/// multiple origins by construction.
///
/// Must only run on a network that passed validation.
pub fn resolve(network: &Network, graph: &ConnectionGraph, tolerance_us: u64) -> TimingResolution {
    let n = graph.point_count();
    let mut arrival: Vec<Option<u64>> = vec![None; n];
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();

    for point in 0..n {
        if graph.is_origin(point) {
            arrival[point] = Some(0);
            heap.push(Reverse((0, point)));
        }
    }

    while let Some(Reverse((time, point))) = heap.pop() {
        if arrival[point] != Some(time) {
            continue; // superseded by an earlier leg
        }
        for edge in graph.outgoing(point) {
            let candidate = time + edge.delay_us;
            if arrival[edge.to].map_or(true, |best| candidate < best) {
                arrival[edge.to] = Some(candidate);
                heap.push(Reverse((candidate, edge.to)));
            }
        }
    }

    let mut warnings = Vec::new();
    let mut timings = Vec::new();
    for point in 0..n {
        let Some(chosen) = arrival[point] else {
            continue; // orphan, or unreached on an unvalidated graph
        };

        // Candidates per incoming leg, now that every upstream hole settled.
        let mut candidates: Vec<(u64, usize)> = Vec::new();
        for edge in graph.incoming(point) {
            if let Some(upstream) = arrival[edge.to] {
                candidates.push((upstream + edge.delay_us, edge.connection));
            }
        }

        let mut contributing: Vec<String> = candidates
            .iter()
            .filter(|&&(time, _)| time <= chosen + tolerance_us)
            .map(|&(_, connection)| network.connections[connection].id.clone())
            .collect();
        contributing.sort_unstable();

        // Redundant legs materially slower than the chosen one are worth a
        // look, but redundancy itself is accepted wiring practice.
        let mut candidate_times: Vec<u64> = candidates.iter().map(|&(time, _)| time).collect();
        candidate_times.sort_unstable();
        if let Some(&slowest) = candidate_times.last() {
            let spread = slowest - chosen;
            if candidate_times.len() + usize::from(graph.is_origin(point)) >= 2
                && spread > tolerance_us
            {
                warnings.push(BlastWarning::TimingAmbiguity {
                    hole_id: network.points[point].id.clone(),
                    chosen_us: chosen,
                    candidates_us: candidate_times,
                    spread_us: spread,
                });
            }
        }

        timings.push(ResolvedTiming {
            hole_id: network.points[point].id.clone(),
            arrival_us: chosen,
            rank: 0,
            contributing,
        });
    }

    // Total order: arrival time first, hole id as the deterministic
    // tie-break, independent of input iteration order.
    timings.sort_by(|a, b| {
        a.arrival_us
            .cmp(&b.arrival_us)
            .then_with(|| a.hole_id.cmp(&b.hole_id))
    });
    for (rank, timing) in timings.iter_mut().enumerate() {
        timing.rank = rank;
    }

    TimingResolution { timings, warnings }
}
