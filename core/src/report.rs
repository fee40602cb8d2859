use crate::network::HoleId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard defects. Any of these blocks timing resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlastError {
    /// Referential: the connection names a hole missing from the snapshot.
    #[error("connection {connection_id} references unknown hole {hole_id}")]
    UnknownHole {
        connection_id: String,
        hole_id: HoleId,
    },
    #[error("connections {first_id} and {second_id} both wire {from_hole_id} -> {to_hole_id}")]
    DuplicateConnection {
        first_id: String,
        second_id: String,
        from_hole_id: HoleId,
        to_hole_id: HoleId,
    },
    #[error("connection {connection_id} wires hole {hole_id} to itself")]
    SelfLoop {
        connection_id: String,
        hole_id: HoleId,
    },
    /// The component around `hole_id` has no flagged starting hole and no
    /// hole free of incoming connections: nothing in it can ever fire.
    #[error("no starting hole reaches the {component_size} holes around {hole_id}")]
    MissingStartingHole {
        hole_id: HoleId,
        component_size: usize,
    },
    /// `path` lists the holes of one detected cycle in propagation order;
    /// the last hole wires back to the first.
    #[error("delay cycle: {}", .path.join(" -> "))]
    Cycle { path: Vec<HoleId> },
}

/// Soft defects. Reported alongside results, never block resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlastWarning {
    #[error("hole {hole_id} is not wired into the sequence")]
    OrphanHole { hole_id: HoleId },
    /// Fires at time zero because nothing feeds it, but no connection out of
    /// it carries the is_starting_hole flag.
    #[error("hole {hole_id} is treated as a starting hole without being flagged")]
    ImplicitStartingHole { hole_id: HoleId },
    #[error("{count} zero-delay connections exceed the limit of {limit}")]
    ZeroDelaySpread {
        count: usize,
        limit: usize,
        connection_ids: Vec<String>,
    },
    /// The hole is reachable over redundant legs whose delays differ by more
    /// than the tolerance. The earliest leg wins; the rest are listed.
    #[error("hole {hole_id} is reached over paths spread {spread_us} us apart")]
    TimingAmbiguity {
        hole_id: HoleId,
        chosen_us: u64,
        candidates_us: Vec<u64>,
        spread_us: u64,
    },
}

/// Everything the validator found, errors and warnings separately, so the
/// caller can display the full damage in one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidationReport {
    pub errors: Vec<BlastError>,
    pub warnings: Vec<BlastWarning>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
