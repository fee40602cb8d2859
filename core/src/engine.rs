use crate::analytics::BlastMetrics;
use crate::graph::ConnectionGraph;
use crate::network::Network;
use crate::report::{BlastError, BlastWarning, ValidationReport};
use crate::simulate::FiringSequence;
use crate::timing::{self, ResolvedTiming};
use crate::validate::validate_graph;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Arrivals within this window fire as one event; it also bounds how far
    /// apart redundant legs into one hole may land before they are flagged.
    pub tolerance_us: u64,
    /// Zero-delay connections past this count trigger a data-entry warning.
    pub zero_delay_warn_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance_us: crate::DEFAULT_TOLERANCE_US,
            zero_delay_warn_limit: crate::ZERO_DELAY_WARN_LIMIT,
        }
    }
}

impl EngineConfig {
    pub fn with_tolerance_ms(ms: f64) -> Self {
        Self {
            tolerance_us: crate::network::ms_to_us(ms).unwrap_or(crate::DEFAULT_TOLERANCE_US),
            ..Self::default()
        }
    }
}

/// Cooperative cancellation flag, checked between phases only; each phase
/// runs to completion once entered.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Build,
    Validate,
    Resolve,
    Group,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Connections naming holes outside the snapshot; aborts before any
    /// structural validation runs.
    #[error("{} connection(s) reference holes missing from the pattern", .errors.len())]
    Referential { errors: Vec<BlastError> },
    #[error("network failed validation with {} error(s)", .report.errors.len())]
    Invalid { report: ValidationReport },
    #[error("computation cancelled before the {phase:?} phase")]
    Cancelled { phase: Phase },
}

/// Everything a successful run produces: per-hole timings, the playback
/// event stream, its timeline metrics, and every warning gathered along the
/// way (structural and timing alike).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlastPlan {
    pub timings: Vec<ResolvedTiming>,
    pub events: FiringSequence,
    pub metrics: BlastMetrics,
    pub warnings: Vec<BlastWarning>,
}

fn check_cancel(cancel: Option<&CancelToken>, phase: Phase) -> Result<(), EngineError> {
    match cancel {
        Some(token) if token.is_cancelled() => Err(EngineError::Cancelled { phase }),
        _ => Ok(()),
    }
}

/// Validation-only entry. Referential errors surface in the report here so a
/// caller gets the complete defect list in one response; `resolve_network`
/// still refuses to proceed past them.
pub fn validate_network(network: &Network, config: &EngineConfig) -> ValidationReport {
    match ConnectionGraph::build(network) {
        Ok(graph) => validate_graph(network, &graph, config),
        Err(errors) => ValidationReport {
            errors,
            warnings: Vec::new(),
        },
    }
}

/// The full pipeline: build -> validate -> resolve -> group. A pure function
/// of the snapshot and config; re-running on the same input reproduces the
/// same plan, ranks and event indices included.
pub fn resolve_network(
    network: &Network,
    config: &EngineConfig,
    cancel: Option<&CancelToken>,
) -> Result<BlastPlan, EngineError> {
    check_cancel(cancel, Phase::Build)?;
    let graph =
        ConnectionGraph::build(network).map_err(|errors| EngineError::Referential { errors })?;
    tracing::debug!(
        points = network.point_count(),
        connections = network.connection_count(),
        "graph built"
    );

    check_cancel(cancel, Phase::Validate)?;
    let report = validate_graph(network, &graph, config);
    if !report.is_valid() {
        tracing::debug!(errors = report.errors.len(), "validation failed");
        return Err(EngineError::Invalid { report });
    }

    check_cancel(cancel, Phase::Resolve)?;
    let resolution = timing::resolve(network, &graph, config.tolerance_us);

    check_cancel(cancel, Phase::Group)?;
    let events = FiringSequence::group(&resolution.timings, config.tolerance_us);
    let metrics = BlastMetrics::measure(&events);
    tracing::debug!(
        events = events.len(),
        total_us = metrics.total_time_us,
        "sequence resolved"
    );

    let mut warnings = report.warnings;
    warnings.extend(resolution.warnings);

    Ok(BlastPlan {
        timings: resolution.timings,
        events,
        metrics,
        warnings,
    })
}
