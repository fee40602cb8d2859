use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Stable hole identity as assigned by the pattern editor.
pub type HoleId = String;

/// A drilled hole. Position and charge figures are carried through for
/// reporting only; the engine never does arithmetic on them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DrillPoint {
    pub id: HoleId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub depth: f64,
    #[serde(default)]
    pub subdrill: f64,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub anfo: f64,
    #[serde(default)]
    pub emulsion: f64,
}

/// A directed delay element: the signal leaves `from_hole_id` and arrives at
/// `to_hole_id` after `delay_us`. `is_starting_hole` marks the from-hole as
/// externally initiated at time zero.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Connection {
    pub id: String,
    pub from_hole_id: HoleId,
    pub to_hole_id: HoleId,
    pub delay_us: u64,
    #[serde(default)]
    pub is_starting_hole: bool,
}

/// Immutable per-computation snapshot: all holes and connectors of one blast
/// sequence. Edits upstream produce a new snapshot; nothing here is mutated.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Network {
    pub points: Vec<DrillPoint>,
    pub connections: Vec<Connection>,
}

/// Malformed-input defects. These abort before graph construction and are
/// distinct from the validation report, which covers well-formed but
/// structurally broken networks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("network blob is malformed: {reason}")]
    MalformedBlob { reason: String },
    #[error("point record {index} is malformed: {reason}")]
    MalformedPoint { index: usize, reason: String },
    #[error("connection record {index} is malformed: {reason}")]
    MalformedConnection { index: usize, reason: String },
    #[error("point record {index} has an empty id")]
    EmptyPointId { index: usize },
    #[error("duplicate point id {id}")]
    DuplicatePointId { id: String },
    #[error("duplicate connection id {id}")]
    DuplicateConnectionId { id: String },
    #[error("point {id} has a non-finite coordinate")]
    NonFiniteCoordinate { id: String },
    #[error("connection {id} has an invalid delay of {delay_ms} ms")]
    InvalidDelay { id: String, delay_ms: f64 },
}

/// Millisecond boundary value to the engine's microsecond clock.
/// Rejects negative and non-finite delays.
pub fn ms_to_us(ms: f64) -> Option<u64> {
    if !ms.is_finite() || ms < 0.0 {
        return None;
    }
    Some((ms * 1000.0).round() as u64)
}

// Loose records as the surrounding CRUD system stores them: milliseconds,
// optional charge columns, legacy camelCase keys.
#[derive(Deserialize)]
struct PointRecord {
    id: String,
    x: f64,
    y: f64,
    #[serde(default)]
    depth: f64,
    #[serde(default)]
    subdrill: f64,
    #[serde(default)]
    volume: f64,
    #[serde(default, alias = "ANFO")]
    anfo: f64,
    #[serde(default)]
    emulsion: f64,
}

#[derive(Deserialize)]
struct ConnectionRecord {
    id: String,
    #[serde(alias = "fromHoleId")]
    from_hole_id: String,
    #[serde(alias = "toHoleId")]
    to_hole_id: String,
    #[serde(alias = "delay", alias = "delayMs")]
    delay_ms: f64,
    #[serde(default, alias = "isStartingHole")]
    is_starting_hole: bool,
}

#[derive(Deserialize)]
struct NetworkBlob {
    #[serde(default, alias = "drillPoints")]
    points: Vec<Value>,
    #[serde(default)]
    connections: Vec<Value>,
}

impl Network {
    pub fn from_parts(
        points: Vec<DrillPoint>,
        connections: Vec<Connection>,
    ) -> Result<Self, Vec<InputError>> {
        let mut errors = Vec::new();

        let mut seen_points = HashSet::new();
        for (index, point) in points.iter().enumerate() {
            if point.id.is_empty() {
                errors.push(InputError::EmptyPointId { index });
            } else if !seen_points.insert(point.id.clone()) {
                errors.push(InputError::DuplicatePointId {
                    id: point.id.clone(),
                });
            }
            if !point.x.is_finite() || !point.y.is_finite() {
                errors.push(InputError::NonFiniteCoordinate {
                    id: point.id.clone(),
                });
            }
        }

        let mut seen_connections = HashSet::new();
        for connection in &connections {
            if !seen_connections.insert(connection.id.clone()) {
                errors.push(InputError::DuplicateConnectionId {
                    id: connection.id.clone(),
                });
            }
        }

        if errors.is_empty() {
            Ok(Self {
                points,
                connections,
            })
        } else {
            Err(errors)
        }
    }

    /// Parse a loose CRUD blob (`{ "points": [...], "connections": [...] }`)
    /// into the strict model. Every malformed record is collected so the
    /// caller sees the whole damage in one pass.
    pub fn from_value(value: Value) -> Result<Self, Vec<InputError>> {
        let blob: NetworkBlob = match serde_json::from_value(value) {
            Ok(blob) => blob,
            Err(err) => {
                return Err(vec![InputError::MalformedBlob {
                    reason: err.to_string(),
                }])
            }
        };

        let mut errors = Vec::new();
        let mut points = Vec::with_capacity(blob.points.len());
        for (index, raw) in blob.points.into_iter().enumerate() {
            match serde_json::from_value::<PointRecord>(raw) {
                Ok(record) => points.push(DrillPoint {
                    id: record.id,
                    x: record.x,
                    y: record.y,
                    depth: record.depth,
                    subdrill: record.subdrill,
                    volume: record.volume,
                    anfo: record.anfo,
                    emulsion: record.emulsion,
                }),
                Err(err) => errors.push(InputError::MalformedPoint {
                    index,
                    reason: err.to_string(),
                }),
            }
        }

        let mut connections = Vec::with_capacity(blob.connections.len());
        for (index, raw) in blob.connections.into_iter().enumerate() {
            match serde_json::from_value::<ConnectionRecord>(raw) {
                Ok(record) => match ms_to_us(record.delay_ms) {
                    Some(delay_us) => connections.push(Connection {
                        id: record.id,
                        from_hole_id: record.from_hole_id,
                        to_hole_id: record.to_hole_id,
                        delay_us,
                        is_starting_hole: record.is_starting_hole,
                    }),
                    None => errors.push(InputError::InvalidDelay {
                        id: record.id,
                        delay_ms: record.delay_ms,
                    }),
                },
                Err(err) => errors.push(InputError::MalformedConnection {
                    index,
                    reason: err.to_string(),
                }),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Self::from_parts(points, connections)
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
