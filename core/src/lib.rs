pub mod analytics;
pub mod engine;
pub mod graph;
pub mod network;
pub mod report;
pub mod simulate;
pub mod timing;
pub mod validate;

pub use analytics::BlastMetrics;
pub use engine::{
    resolve_network, validate_network, BlastPlan, CancelToken, EngineConfig, EngineError, Phase,
};
pub use graph::ConnectionGraph;
pub use network::{ms_to_us, Connection, DrillPoint, HoleId, InputError, Network};
pub use report::{BlastError, BlastWarning, ValidationReport};
pub use simulate::{FiringEvent, FiringSequence};
pub use timing::{ResolvedTiming, TimingResolution};

/// Engine defaults (in Microseconds)
pub const DEFAULT_TOLERANCE_US: u64 = 1_000; // 1ms simultaneity window
pub const ZERO_DELAY_WARN_LIMIT: usize = 5;
