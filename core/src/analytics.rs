use crate::simulate::FiringSequence;
use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};

/// Timeline shape of a resolved sequence, for the safety-review summary:
/// how long the blast runs, how bunched the detonations are, and how the
/// gaps between events are distributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BlastMetrics {
    pub total_time_us: u64,
    pub event_count: usize,
    pub hole_count: usize,
    pub max_simultaneous: usize,
    pub mean_gap_us: f64,
    pub p50_gap_us: u64,
    pub p99_gap_us: u64,
}

impl BlastMetrics {
    pub fn measure(sequence: &FiringSequence) -> Self {
        let event_count = sequence.len();
        let hole_count = sequence.events().map(|e| e.holes.len()).sum();
        let max_simultaneous = sequence.events().map(|e| e.holes.len()).max().unwrap_or(0);
        let total_time_us = sequence.total_time_us().unwrap_or(0);

        let times: Vec<u64> = sequence.events().map(|e| e.time_us).collect();
        let gaps: Vec<u64> = times.windows(2).map(|w| w[1] - w[0]).collect();

        let mean_gap_us = if gaps.is_empty() {
            0.0
        } else {
            gaps.iter().sum::<u64>() as f64 / gaps.len() as f64
        };

        let (p50_gap_us, p99_gap_us) = match Histogram::<u64>::new(3) {
            Ok(mut histogram) if !gaps.is_empty() => {
                for &gap in &gaps {
                    let _ = histogram.record(gap);
                }
                (
                    histogram.value_at_quantile(0.50),
                    histogram.value_at_quantile(0.99),
                )
            }
            _ => (0, 0),
        };

        Self {
            total_time_us,
            event_count,
            hole_count,
            max_simultaneous,
            mean_gap_us,
            p50_gap_us,
            p99_gap_us,
        }
    }
}
