//! telemetry/snapshot.rs
//! Immutable telemetry snapshot handed back to callers that ask for it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::DriveCounters;
use crate::telemetry::timers::{PhaseTimes, TelemetryTimer};
use crate::types::Direction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub direction: Direction,
    pub slices: u64,
    pub steps: u64,
    pub growth_events: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub unused_input: u64,
    pub scratch_bytes: u64,
    /// Output bytes per input byte.
    pub ratio: f64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub phases: PhaseTimes,
}

impl TelemetrySnapshot {
    pub fn from(direction: Direction, counters: &DriveCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let ratio = if counters.bytes_in > 0 {
            counters.bytes_out as f64 / counters.bytes_in as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_in as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            direction,
            slices: counters.slices,
            steps: counters.steps,
            growth_events: counters.growth_events,
            bytes_in: counters.bytes_in,
            bytes_out: counters.bytes_out,
            unused_input: counters.unused_input,
            scratch_bytes: counters.scratch_bytes,
            ratio,
            throughput_bytes_per_sec: throughput,
            elapsed,
            phases: timer.phases(),
        }
    }

    /// Internal consistency: phases fit inside the elapsed time and at least
    /// one step ran per slice.
    pub fn sanity_check(&self) -> bool {
        self.phases.total() <= self.elapsed && self.steps >= self.slices
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
