use crate::network::HoleId;
use crate::timing::ResolvedTiming;
use serde::{Deserialize, Serialize};

/// One step of the playback timeline: every hole whose arrival falls inside
/// the event's tolerance window, detonating together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiringEvent {
    pub index: usize,
    /// Earliest arrival in the group.
    pub time_us: u64,
    /// Ordered by hole id.
    pub holes: Vec<HoleId>,
}

/// The finite, replayable event stream. Iteration never mutates the
/// sequence; `events()` hands out a fresh pass every call, so one consumer
/// can persist the stream and another replay it without recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FiringSequence {
    events: Vec<FiringEvent>,
}

impl FiringSequence {
    /// Group resolved timings into events. A hole joins the open event while
    /// its arrival is within `tolerance_us` of the event's first arrival;
    /// otherwise it opens the next event. Input order (arrival, hole id) is
    /// already total, so grouping is deterministic.
    pub fn group(timings: &[ResolvedTiming], tolerance_us: u64) -> Self {
        let mut events: Vec<FiringEvent> = Vec::new();
        for timing in timings {
            match events.last_mut() {
                Some(event) if timing.arrival_us <= event.time_us + tolerance_us => {
                    event.holes.push(timing.hole_id.clone());
                }
                _ => events.push(FiringEvent {
                    index: events.len(),
                    time_us: timing.arrival_us,
                    holes: vec![timing.hole_id.clone()],
                }),
            }
        }
        for event in &mut events {
            event.holes.sort_unstable();
        }
        Self { events }
    }

    pub fn events(&self) -> impl Iterator<Item = &FiringEvent> + '_ {
        self.events.iter()
    }

    pub fn get(&self, index: usize) -> Option<&FiringEvent> {
        self.events.get(index)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Time of the final detonation, if anything fires.
    pub fn total_time_us(&self) -> Option<u64> {
        self.events.last().map(|event| event.time_us)
    }
}
